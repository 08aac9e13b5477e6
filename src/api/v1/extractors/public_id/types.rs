/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 置くもの
 *  - ProfileTag などのタグ型と alias
 *
 * 置かないもの
 *  - decode ロジック / extractor 実装
 */
use super::core::PublicId;

// profiles
pub enum ProfileTag {}
pub type PublicProfileId = PublicId<ProfileTag>;
