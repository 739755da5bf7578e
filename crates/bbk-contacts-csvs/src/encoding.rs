/*!
# Text Encodings

Loan exports arrive as UTF-8 (with or without BOM) or as GBK/GB18030 straight out
of Excel on a Chinese Windows install. The contact importer only understands
GB18030 without a BOM.
*/

use crate::schemas::InputEncoding;
use encoding_rs::{GB18030, GBK, UTF_8};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode input bytes with the first encoding in `InputEncoding::DETECTION_ORDER`
/// that accepts them without errors.
pub fn decode_input(bytes: &[u8]) -> Option<(String, InputEncoding)> {
    InputEncoding::DETECTION_ORDER
        .iter()
        .find_map(|&encoding| decode_as(bytes, encoding).map(|text| (text, encoding)))
}

/// Strict decode, `None` on any malformed sequence
pub fn decode_as(bytes: &[u8], encoding: InputEncoding) -> Option<String> {
    match encoding {
        // A BOM is left for the utf-8-sig attempt so it never leaks into the first header
        InputEncoding::Utf8 => {
            if bytes.starts_with(UTF8_BOM) {
                return None;
            }
            UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
        }
        InputEncoding::Utf8Bom => {
            let body = bytes.strip_prefix(UTF8_BOM)?;
            UTF_8
                .decode_without_bom_handling_and_without_replacement(body)
                .map(|text| text.into_owned())
        }
        InputEncoding::Gbk => GBK
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned()),
        InputEncoding::Gb18030 => GB18030
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned()),
    }
}

/// Encode text as GB18030 without a byte-order mark.
///
/// GB18030 covers all of Unicode, so nothing is ever substituted.
pub fn encode_gb18030(text: &str) -> Vec<u8> {
    let (bytes, _, _) = GB18030.encode(text);
    bytes.into_owned()
}

/// Comma-separated labels of the detection order, for error messages
pub fn detection_order_labels() -> String {
    InputEncoding::DETECTION_ORDER
        .iter()
        .map(InputEncoding::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8_detected_first() {
        let (text, encoding) = decode_input("客户姓名,手机号码".as_bytes()).unwrap();
        assert_eq!(text, "客户姓名,手机号码");
        assert_eq!(encoding, InputEncoding::Utf8);
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("客户姓名".as_bytes());

        let (text, encoding) = decode_input(&bytes).unwrap();
        assert_eq!(text, "客户姓名");
        assert_eq!(encoding, InputEncoding::Utf8Bom);
    }

    #[test]
    fn test_gbk_bytes_fall_through_to_gbk() {
        let (bytes, _, _) = GBK.encode("担保人姓名,手机号码");
        assert!(std::str::from_utf8(&bytes).is_err());

        let (text, encoding) = decode_input(&bytes).unwrap();
        assert_eq!(text, "担保人姓名,手机号码");
        assert_eq!(encoding, InputEncoding::Gbk);
    }

    #[test]
    fn test_undecodable_bytes_rejected() {
        assert!(decode_input(&[0xFF, 0xFF, 0xFF]).is_none());
    }

    #[test]
    fn test_gb18030_output_has_no_bom_and_round_trips() {
        let names = "张三,李四_担保,亳州,䶮";
        let bytes = encode_gb18030(names);

        assert!(!bytes.starts_with(UTF8_BOM));
        assert_eq!(decode_as(&bytes, InputEncoding::Gb18030).unwrap(), names);
    }

    #[test]
    fn test_detection_order_labels() {
        assert_eq!(detection_order_labels(), "utf-8, utf-8-sig, gbk, gb18030");
    }
}
