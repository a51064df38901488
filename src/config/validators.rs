//! 配置值验证模块

use super::StaticConfig;

/// 验证静态配置是否合法
pub fn validate_static_config(config: &StaticConfig) -> Result<(), String> {
    if config.pipeline.chunk_size == 0 {
        return Err("pipeline.chunk_size must be at least 1".to_string());
    }

    if config.pipeline.min_postings == 0 {
        return Err("pipeline.min_postings must be at least 1".to_string());
    }

    if config.database.pool_size == 0 {
        return Err("database.pool_size must be at least 1".to_string());
    }

    match config.logging.format.as_str() {
        "text" | "json" => {}
        other => {
            return Err(format!(
                "Invalid logging.format: '{}'. Valid: text, json",
                other
            ));
        }
    }

    Ok(())
}
