/*
 * Responsibility
 * - middleware の公開インターフェース
 * - http (request-id/trace/limit/timeout), cors, security_headers, auth (bearer)
 */
pub mod auth;
pub mod bearer_auth;
pub mod cors;
pub mod http;
pub mod security_headers;
