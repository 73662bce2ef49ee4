pub use bcrypt::DEFAULT_COST;

// 密码加密
pub fn hash_password(pwd: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(pwd, cost)
}

// 验证密码, 哈希格式错误按不匹配处理
pub fn verify_password(pwd: &str, hashed: &str) -> bool {
    match bcrypt::verify(pwd, hashed) {
        Ok(matched) => matched,
        Err(err) => {
            tracing::warn!("password verify error: {}", err.to_string());
            false
        }
    }
}
