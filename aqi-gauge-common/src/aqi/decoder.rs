//! WAQI 响应解析
//!
//! ```json
//! {"status":"ok","data":{"aqi":42,"dominentpol":"pm25","time":{"s":"2024-01-01 00:00:00"}}}
//! ```

use alloc::string::String as JsonKey;
use heapless::String;
use serde_json::{Map, Value};

use crate::types::{DecodeError, Reading};

type JsonObject = Map<JsonKey, Value>;

pub fn decode(payload: &[u8]) -> Result<Reading, DecodeError> {
    let root: Value = serde_json::from_slice(payload).map_err(|_| DecodeError::Malformed("root"))?;
    let root = root.as_object().ok_or(DecodeError::Malformed("root"))?;

    let status = string_field(root, "status", "status")?;
    if status != "ok" {
        return Err(DecodeError::StatusNotOk);
    }

    let data = object_field(root, "data", "data")?;

    let aqi = data
        .get("aqi")
        .and_then(Value::as_i64)
        .and_then(|aqi| i32::try_from(aqi).ok())
        .ok_or(DecodeError::Malformed("aqi"))?;

    let dominentpol = bounded(string_field(data, "dominentpol", "dominentpol")?, "dominentpol")?;

    let time = object_field(data, "time", "time")?;
    let measure_time = bounded(string_field(time, "s", "time.s")?, "time.s")?;

    Ok(Reading::new(aqi, dominentpol, measure_time))
}

/// 非 ok 响应中 `data` 字段携带的错误信息
pub fn upstream_message(payload: &[u8]) -> Option<String<64>> {
    let root: Value = serde_json::from_slice(payload).ok()?;
    let message = root.get("data")?.as_str()?;
    let end = message
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= 64)
        .last()
        .unwrap_or(0);
    String::try_from(&message[..end]).ok()
}

fn string_field<'a>(
    object: &'a JsonObject,
    key: &str,
    field: &'static str,
) -> Result<&'a str, DecodeError> {
    object
        .get(key)
        .and_then(Value::as_str)
        .ok_or(DecodeError::Malformed(field))
}

fn object_field<'a>(
    object: &'a JsonObject,
    key: &str,
    field: &'static str,
) -> Result<&'a JsonObject, DecodeError> {
    object
        .get(key)
        .and_then(Value::as_object)
        .ok_or(DecodeError::Malformed(field))
}

fn bounded<const N: usize>(value: &str, field: &'static str) -> Result<String<N>, DecodeError> {
    String::try_from(value).map_err(|_| DecodeError::Malformed(field))
}
