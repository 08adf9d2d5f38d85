use crate::config::AppConfig;
use crate::errors::{MutaError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 使用配置中的参数生成 argon2id 哈希
pub fn hash_password(password: &str) -> Result<String> {
    let config = &AppConfig::get().argon2;
    hash_with_params(
        password,
        config.memory_cost,
        config.time_cost,
        config.parallelism,
    )
}

fn hash_with_params(password: &str, memory: u32, time: u32, lanes: u32) -> Result<String> {
    let params = Params::new(memory, time, lanes, None)
        .map_err(|e| MutaError::validation(format!("Argon2 参数错误: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| MutaError::validation(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 参数从哈希串中读取，与当前配置无关
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_with_params("s3cret!", 4096, 1, 1).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret!", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-hash"));
    }
}
