use serde::{Deserialize, Serialize};

/// 原始招聘记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub standard_job_id: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub days_to_hire: Option<i32>,
}

/// 统计分组键；`country_code == None` 表示跨国家汇总
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub standard_job_id: String,
    pub country_code: Option<String>,
}

impl GroupKey {
    pub fn new(standard_job_id: impl Into<String>, country_code: Option<String>) -> Self {
        Self {
            standard_job_id: standard_job_id.into(),
            country_code,
        }
    }

    pub fn global(standard_job_id: impl Into<String>) -> Self {
        Self::new(standard_job_id, None)
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}",
            self.standard_job_id,
            self.country_code.as_deref().unwrap_or("*")
        )
    }
}

/// 分组范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupScope {
    /// 按 (standard_job_id, country_code) 分组，仅包含有国家的记录
    ByCountry,
    /// 按 standard_job_id 分组，跨所有国家
    Global,
}

impl GroupScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupScope::ByCountry => "by_country",
            GroupScope::Global => "global",
        }
    }
}

/// 一个分组的原始样本（每条有效招聘记录一个值）
#[derive(Debug, Clone, PartialEq)]
pub struct StatsGroup {
    pub key: GroupKey,
    pub samples: Vec<i64>,
}

/// 持久化的统计结果（对外查询结构）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaysToHireStats {
    pub standard_job_id: String,
    pub country_code: Option<String>,
    pub min_days: f64,
    pub avg_days: f64,
    pub max_days: f64,
    pub job_postings_number: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
