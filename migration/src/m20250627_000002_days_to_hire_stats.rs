use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 days_to_hire_stats 表（每次重算整表重建）
        manager
            .create_table(
                Table::create()
                    .table(DaysToHireStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DaysToHireStats::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DaysToHireStats::StandardJobId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DaysToHireStats::CountryCode).string().null())
                    .col(ColumnDef::new(DaysToHireStats::MinDays).double().not_null())
                    .col(ColumnDef::new(DaysToHireStats::AvgDays).double().not_null())
                    .col(ColumnDef::new(DaysToHireStats::MaxDays).double().not_null())
                    .col(
                        ColumnDef::new(DaysToHireStats::JobPostingsNumber)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 查询接口索引；(job, country) 唯一性由重算流程保证，不建唯一约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_days_to_hire_stats_lookup")
                    .table(DaysToHireStats::Table)
                    .col(DaysToHireStats::StandardJobId)
                    .col(DaysToHireStats::CountryCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_days_to_hire_stats_lookup")
                    .table(DaysToHireStats::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DaysToHireStats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DaysToHireStats {
    #[sea_orm(iden = "days_to_hire_stats")]
    Table,
    Id,
    StandardJobId,
    CountryCode,
    MinDays,
    AvgDays,
    MaxDays,
    JobPostingsNumber,
}
