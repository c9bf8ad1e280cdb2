use crate::error::RecognitionError;
use once_cell::sync::Lazy;
use regex::Regex;

/// data:image/<fmt>;base64,<data>
static DATA_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/(\w+);base64,(.+)$").expect("valid regex"));

const SUPPORTED_FORMATS: [&str; 4] = ["jpeg", "jpg", "png", "webp"];

/// base64 数据超过 20 MiB 时告警 (约对应 15MB 原始图片)
const WARN_BASE64_LEN: usize = 20 * 1024 * 1024;

/// 预处理图片：校验格式并规范成 data URL
///
/// 带 data URL 前缀时校验图片格式；前缀存在但模式不匹配时原样透传；
/// 完全没有前缀时按 JPEG 补全前缀 (向后兼容裸 base64 上传)。
pub fn normalize_image(payload: &str) -> Result<String, RecognitionError> {
    if !payload.starts_with("data:") {
        return Ok(format!("data:image/jpeg;base64,{}", payload));
    }

    let Some(caps) = DATA_URL_RE.captures(payload) else {
        // data: 前缀存在但格式不标准，透传给模型自行处理
        return Ok(payload.to_string());
    };

    let format = caps[1].to_lowercase();
    if !SUPPORTED_FORMATS.contains(&format.as_str()) {
        tracing::warn!("不支持的图片格式: {}", format);
        return Err(RecognitionError::UnsupportedFormat(format));
    }

    let data = &caps[2];
    if data.len() > WARN_BASE64_LEN {
        tracing::warn!("图片过大，可能影响识别性能");
    }

    Ok(format!("data:image/{};base64,{}", format, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_formats_keep_their_tag() {
        for format in ["jpeg", "jpg", "png", "webp", "PNG", "Jpeg"] {
            let payload = format!("data:image/{};base64,aGVsbG8=", format);
            let url = normalize_image(&payload).unwrap();
            assert_eq!(
                url,
                format!("data:image/{};base64,aGVsbG8=", format.to_lowercase())
            );
        }
    }

    #[test]
    fn unsupported_format_is_rejected() {
        let err = normalize_image("data:image/gif;base64,aGVsbG8=").unwrap_err();
        match err {
            RecognitionError::UnsupportedFormat(fmt) => assert_eq!(fmt, "gif"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_data_url_passes_through() {
        let payload = "data:application/pdf;base64,aGVsbG8=";
        assert_eq!(normalize_image(payload).unwrap(), payload);
    }

    #[test]
    fn bare_base64_becomes_jpeg_data_url() {
        assert_eq!(
            normalize_image("aGVsbG8=").unwrap(),
            "data:image/jpeg;base64,aGVsbG8="
        );
    }
}
