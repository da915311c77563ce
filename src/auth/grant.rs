/// Grants OAuth2 suportados pelo amoCRM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    AuthorizationCode,
    RefreshToken,
}

impl Grant {
    /// Valor enviado em `grant_type`
    pub fn name(&self) -> &'static str {
        match self {
            Grant::AuthorizationCode => "authorization_code",
            Grant::RefreshToken => "refresh_token",
        }
    }

    /// Parâmetros que precisam estar presentes e não vazios
    pub fn required_parameters(&self) -> &'static [&'static str] {
        match self {
            Grant::AuthorizationCode => &["code"],
            Grant::RefreshToken => &["refresh_token"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_descriptors() {
        assert_eq!(Grant::AuthorizationCode.name(), "authorization_code");
        assert_eq!(Grant::AuthorizationCode.required_parameters(), &["code"]);
        assert_eq!(Grant::RefreshToken.name(), "refresh_token");
        assert_eq!(Grant::RefreshToken.required_parameters(), &["refresh_token"]);
    }
}
