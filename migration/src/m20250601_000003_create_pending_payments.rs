use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create pending_payments table
        manager
            .create_table(
                Table::create()
                    .table(PendingPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PendingPayments::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PendingPayments::PaymentId)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PendingPayments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PendingPayments {
    Table,
    UserId,
    PaymentId,
}
