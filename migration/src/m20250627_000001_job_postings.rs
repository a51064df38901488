use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 job_postings 表（原始招聘数据，统计流水线只读）
        manager
            .create_table(
                Table::create()
                    .table(JobPosting::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobPosting::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JobPosting::Title).text().null())
                    .col(
                        ColumnDef::new(JobPosting::StandardJobId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JobPosting::CountryCode).string().null())
                    .col(ColumnDef::new(JobPosting::DaysToHire).integer().null())
                    .to_owned(),
            )
            .await?;

        // 分组提取按 (standard_job_id, country_code) 排序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_job_postings_job_country")
                    .table(JobPosting::Table)
                    .col(JobPosting::StandardJobId)
                    .col(JobPosting::CountryCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_job_postings_job_country")
                    .table(JobPosting::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(JobPosting::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum JobPosting {
    #[sea_orm(iden = "job_postings")]
    Table,
    Id,
    Title,
    StandardJobId,
    CountryCode,
    DaysToHire,
}
