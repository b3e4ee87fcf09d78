use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

/// 短码列宽，与 `snaplink::utils::MAX_SHORT_CODE_LEN` 一致
const SHORT_CODE_LEN: u32 = 64;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShortLink::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShortLink::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(short_code_column(manager.get_database_backend()))
                    .col(ColumnDef::new(ShortLink::TargetUrl).text().not_null())
                    .col(
                        ColumnDef::new(ShortLink::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShortLink::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 短码唯一索引，分配器并发竞争时由它兜底
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_links_short_code")
                    .table(ShortLink::Table)
                    .col(ShortLink::ShortCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_short_links_short_code")
                    .table(ShortLink::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ShortLink::Table).to_owned())
            .await
    }
}

/// 短码列：区分大小写
///
/// MySQL 的默认排序规则不区分大小写，`abc` 和 `ABC` 会命中同一行并触发唯一约束，
/// 因此显式使用二进制排序规则。SQLite 和 PostgreSQL 的默认比较本身区分大小写。
fn short_code_column(backend: DatabaseBackend) -> ColumnDef {
    let mut column = ColumnDef::new(ShortLink::ShortCode);
    column.string_len(SHORT_CODE_LEN).not_null();
    if backend == DatabaseBackend::MySql {
        column.extra("CHARACTER SET utf8mb4 COLLATE utf8mb4_bin");
    }
    column
}

#[derive(DeriveIden)]
enum ShortLink {
    #[sea_orm(iden = "short_links")]
    Table,
    Id,
    ShortCode,
    TargetUrl,
    CreatedAt,
    UpdatedAt,
}
