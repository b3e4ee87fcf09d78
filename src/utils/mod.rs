pub mod url_validator;

/// 短码字符表：去掉了 0/1/I/O/l 等易混淆字符
pub const CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// 短码最大长度（与 short_links.short_code 列宽一致）
pub const MAX_SHORT_CODE_LEN: usize = 64;

/// 与顶层路由冲突的保留短码
pub const RESERVED_SHORT_CODES: &[&str] = &["admin", "shorten", "health", "links"];

pub fn generate_random_code(length: usize) -> String {
    generate_code_from(CODE_ALPHABET, length)
}

/// 从给定字符表中均匀随机选取字符
pub fn generate_code_from(alphabet: &[u8], length: usize) -> String {
    use std::iter;

    if alphabet.is_empty() {
        return String::new();
    }

    iter::repeat_with(|| alphabet[rand::random_range(0..alphabet.len())] as char)
        .take(length)
        .collect()
}

/// 短码格式校验：1..=64 个字符，只允许字母、数字、下划线、连字符和点
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_SHORT_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}

/// 是否与保留路由冲突（大小写不敏感）
pub fn is_reserved_short_code(code: &str) -> bool {
    RESERVED_SHORT_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_random_code_length() {
        assert_eq!(generate_random_code(7).len(), 7);
        assert_eq!(generate_random_code(1).len(), 1);
        assert_eq!(generate_random_code(0).len(), 0);
    }

    #[test]
    fn test_generate_random_code_characters() {
        let valid: HashSet<char> = CODE_ALPHABET.iter().map(|b| *b as char).collect();
        for ch in generate_random_code(200).chars() {
            assert!(valid.contains(&ch), "Invalid character: {}", ch);
        }
    }

    #[test]
    fn test_generate_random_code_uniqueness() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_random_code(7)).collect();
        assert!(codes.len() > 990, "Generated codes lack sufficient randomness");
    }

    #[test]
    fn test_generate_code_from_empty_alphabet() {
        assert!(generate_code_from(b"", 5).is_empty());
    }

    #[test]
    fn test_alphabet_has_no_ambiguous_glyphs() {
        for ch in [b'0', b'1', b'I', b'O', b'l'] {
            assert!(!CODE_ALPHABET.contains(&ch));
        }
        assert_eq!(CODE_ALPHABET.len(), 57);
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("abc1234"));
        assert!(is_valid_short_code("my-link_v1.0"));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("has space"));
        assert!(!is_valid_short_code("<script>"));
        assert!(!is_valid_short_code("a/b"));
        assert!(!is_valid_short_code(&"a".repeat(MAX_SHORT_CODE_LEN + 1)));
    }

    #[test]
    fn test_is_reserved_short_code() {
        assert!(is_reserved_short_code("admin"));
        assert!(is_reserved_short_code("SHORTEN"));
        assert!(is_reserved_short_code("Health"));
        assert!(!is_reserved_short_code("abc1234"));
    }
}
