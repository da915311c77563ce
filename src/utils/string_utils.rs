/// Utilitários para exibir segredos em logs sem expô-los

/// Quantidade de bytes visíveis de um segredo nos logs
const VISIBLE_SECRET_BYTES: usize = 6;

/// Trunca uma string sem cortar no meio de um caractere UTF-8
pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// Mascara um token para logs: `abcdef...` (ou `<empty>`)
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "<empty>".to_string();
    }

    format!("{}...", truncate_safe(secret, VISIBLE_SECRET_BYTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_safe_utf8() {
        let text = "Привет";
        // cada letra cirílica ocupa 2 bytes
        assert_eq!(truncate_safe(text, 3), "П");
        assert_eq!(truncate_safe(text, 4), "Пр");
        assert_eq!(truncate_safe(text, 100), text);
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "<empty>");
        assert_eq!(mask_secret("abc"), "abc...");
        assert_eq!(mask_secret("def50200a1b2c3"), "def502...");
    }
}
