//! CSV 导入导出共享逻辑
//!
//! 招聘记录从 CSV 导入，统计快照导出为 CSV。

use chrono::Utc;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::errors::{HireStatsError, Result};
use crate::storage::{DaysToHireStats, JobPosting};

/// 招聘记录 CSV 行；空单元格反序列化为 None
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvPostingRow {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub standard_job_id: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub days_to_hire: Option<i32>,
}

/// 统计快照 CSV 行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvStatsRow {
    pub standard_job_id: String,
    pub country_code: Option<String>,
    pub min_days: f64,
    pub avg_days: f64,
    pub max_days: f64,
    pub job_postings_number: i64,
}

impl From<&DaysToHireStats> for CsvStatsRow {
    fn from(stats: &DaysToHireStats) -> Self {
        Self {
            standard_job_id: stats.standard_job_id.clone(),
            country_code: stats.country_code.clone(),
            min_days: stats.min_days,
            avg_days: stats.avg_days,
            max_days: stats.max_days,
            job_postings_number: stats.job_postings_number,
        }
    }
}

impl CsvPostingRow {
    /// 校验并转换为 JobPosting
    pub fn into_posting(self) -> std::result::Result<JobPosting, String> {
        if self.id.is_empty() {
            return Err("empty id".to_string());
        }
        if self.standard_job_id.is_empty() {
            return Err("empty standard_job_id".to_string());
        }
        if let Some(days) = self.days_to_hire
            && days < 0
        {
            return Err(format!("negative days_to_hire: {}", days));
        }

        Ok(JobPosting {
            id: self.id,
            title: self.title.filter(|t| !t.is_empty()),
            standard_job_id: self.standard_job_id,
            country_code: self.country_code.filter(|c| !c.is_empty()),
            days_to_hire: self.days_to_hire,
        })
    }
}

/// 从任意 reader 读取招聘记录；任一行出错即整体失败
pub fn read_postings<R: Read>(reader: R) -> Result<Vec<JobPosting>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut postings = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<CsvPostingRow>().enumerate() {
        let row_num = row_idx + 2; // CSV 行号（1-based，跳过 header）
        let row = result.map_err(|e| {
            HireStatsError::validation(format!("Row {}: CSV parse error: {}", row_num, e))
        })?;
        let posting = row
            .into_posting()
            .map_err(|e| HireStatsError::validation(format!("Row {}: {}", row_num, e)))?;
        postings.push(posting);
    }

    Ok(postings)
}

/// 从 CSV 文件导入招聘记录
pub fn import_postings<P: AsRef<Path>>(path: P) -> Result<Vec<JobPosting>> {
    let file = File::open(path.as_ref())
        .map_err(|e| HireStatsError::file_operation(format!("Failed to open file: {}", e)))?;
    read_postings(BufReader::new(file))
}

/// 把统计快照写到任意 writer
pub fn write_stats<W: Write>(rows: &[DaysToHireStats], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);

    for stats in rows {
        csv_writer
            .serialize(CsvStatsRow::from(stats))
            .map_err(|e| {
                HireStatsError::serialization(format!("Failed to write CSV row: {}", e))
            })?;
    }

    csv_writer
        .flush()
        .map_err(|e| HireStatsError::file_operation(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

/// 导出统计快照到 CSV 文件
pub fn export_stats<P: AsRef<Path>>(rows: &[DaysToHireStats], path: P) -> Result<()> {
    let file = File::create(path.as_ref())
        .map_err(|e| HireStatsError::file_operation(format!("Failed to create file: {}", e)))?;
    write_stats(rows, BufWriter::new(file))
}

/// 生成默认导出文件名（带时间戳）
pub fn generate_export_filename() -> String {
    format!(
        "days_to_hire_stats_{}.csv",
        Utc::now().format("%Y%m%d_%H%M%S")
    )
}
