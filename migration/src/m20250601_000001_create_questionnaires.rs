use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create questionnaires table
        manager
            .create_table(
                Table::create()
                    .table(Questionnaires::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questionnaires::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questionnaires::Name).string())
                    .col(ColumnDef::new(Questionnaires::Age).integer())
                    .col(ColumnDef::new(Questionnaires::Style).string())
                    .col(ColumnDef::new(Questionnaires::Colors).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Questionnaires::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Questionnaires {
    Table,
    UserId,
    Name,
    Age,
    Style,
    Colors,
}
