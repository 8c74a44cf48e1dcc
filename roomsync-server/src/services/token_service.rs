use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::configs::Auth;
use crate::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: i32,
    pub token: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i32,
    pub username: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Clone)]
pub struct TokenService {
    expiration: u64,
    secret: String,
}

impl TokenService {
    pub fn new(auth: Auth) -> Self {
        Self {
            expiration: auth.expiration,
            secret: auth.secret,
        }
    }

    pub fn retrieve_token_claims(
        &self,
        token: &str,
    ) -> Result<TokenData<TokenClaims>, jsonwebtoken::errors::Error> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
    }

    pub fn generate_token(&self, user: &User) -> Result<Token, jsonwebtoken::errors::Error> {
        let iat = OffsetDateTime::now_utc().unix_timestamp().max(0) as u64;
        let exp = iat + self.expiration;

        let claims = TokenClaims {
            sub: user.id,
            username: user.username.clone(),
            iat,
            exp,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        let token = encode(&Header::default(), &claims, &encoding_key)?;

        Ok(Token {
            id: claims.sub,
            token,
            iat,
            exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 1,
            username: String::from("alice"),
            password: String::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_generate_and_retrieve_token() {
        let token_service = TokenService::new(Auth {
            secret: String::from("test"),
            expiration: 1000,
        });
        let user = test_user();

        let token = token_service.generate_token(&user).unwrap();
        let claims = token_service
            .retrieve_token_claims(&token.token)
            .unwrap()
            .claims;

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, user.username);
        assert_eq!(claims.exp - claims.iat, 1000);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = TokenService::new(Auth {
            secret: String::from("issuer"),
            expiration: 1000,
        });
        let verifier = TokenService::new(Auth {
            secret: String::from("verifier"),
            expiration: 1000,
        });

        let token = issuer.generate_token(&test_user()).unwrap();

        assert!(verifier.retrieve_token_claims(&token.token).is_err());
        assert!(verifier.retrieve_token_claims("not-a-token").is_err());
    }
}
