//! Active24 HMAC-SHA1 请求签名
//!
//! The canonical message is `"<METHOD> <absolute path> <unix timestamp>"`; the
//! signature is the lowercase hex HMAC-SHA1 of that message keyed by the API
//! secret, sent as the Basic-auth password.

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// 拼接规范请求串
pub(crate) fn canonical_message(method: &str, path: &str, timestamp: i64) -> String {
    format!("{method} {path} {timestamp}")
}

/// HMAC-SHA1(secret, message)，小写十六进制
pub(crate) fn signature(message: &str, secret: &str) -> String {
    let Ok(mut mac) = HmacSha1::new_from_slice(secret.as_bytes()) else {
        unreachable!("HMAC can take key of any size");
    };
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
