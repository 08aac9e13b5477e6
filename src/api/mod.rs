/*
 * Responsibility
 * - API バージョンの束ね (v1)
 */
pub mod v1;
