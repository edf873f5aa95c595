use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240115_000001_create_customer_table::Migration),
            Box::new(m20240115_000002_create_supplier_table::Migration),
            Box::new(m20240115_000003_create_product_table::Migration),
            Box::new(m20240115_000004_create_orders_table::Migration),
            Box::new(m20240115_000005_create_productorder_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240115_000001_create_customer_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000001_create_customer_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customer::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customer::CustomerId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Customer::Name).string().not_null())
                        .col(ColumnDef::new(Customer::Phone).string().not_null())
                        .col(ColumnDef::new(Customer::Address).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customer::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Customer {
        Table,
        CustomerId,
        Name,
        Phone,
        Address,
    }
}

mod m20240115_000002_create_supplier_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000002_create_supplier_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Supplier::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Supplier::SupplierId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Supplier::Name).string().not_null())
                        .col(ColumnDef::new(Supplier::Phone).string().not_null())
                        .col(ColumnDef::new(Supplier::Email).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Supplier::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Supplier {
        Table,
        SupplierId,
        Name,
        Phone,
        Email,
    }
}

mod m20240115_000003_create_product_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000003_create_product_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Product::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Product::ProductId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Product::Name).string().not_null())
                        .col(
                            ColumnDef::new(Product::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Product::ExpiryDate).date().not_null())
                        .col(ColumnDef::new(Product::PricePerUnit).decimal().not_null())
                        .col(ColumnDef::new(Product::CostPerUnit).decimal().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Product::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Product {
        Table,
        ProductId,
        Name,
        Quantity,
        ExpiryDate,
        PricePerUnit,
        CostPerUnit,
    }
}

mod m20240115_000004_create_orders_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000004_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // No FK to customer: deleting a customer with existing orders is
            // unguarded, matching the observed schema.
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Orders::OrderId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Orders::CustomerId).integer().not_null())
                        .col(ColumnDef::new(Orders::OrderDate).date().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_customer_id")
                        .table(Orders::Table)
                        .col(Orders::CustomerId)
                        .to_owned(),
                )
                .await?;

            // Yearly reports filter on order_date ranges.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_order_date")
                        .table(Orders::Table)
                        .col(Orders::OrderDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Orders {
        Table,
        OrderId,
        CustomerId,
        OrderDate,
    }
}

mod m20240115_000005_create_productorder_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000005_create_productorder_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductOrder::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductOrder::ProductOrderId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ProductOrder::OrderId).integer().not_null())
                        .col(ColumnDef::new(ProductOrder::ProductId).integer().not_null())
                        .col(ColumnDef::new(ProductOrder::Quantity).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_productorder_order_id")
                                .from(ProductOrder::Table, ProductOrder::OrderId)
                                .to(Orders::Table, Orders::OrderId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_productorder_product_id")
                                .from(ProductOrder::Table, ProductOrder::ProductId)
                                .to(Product::Table, Product::ProductId),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_productorder_order_id")
                        .table(ProductOrder::Table)
                        .col(ProductOrder::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_productorder_product_id")
                        .table(ProductOrder::Table)
                        .col(ProductOrder::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductOrder::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProductOrder {
        #[sea_orm(iden = "productorder")]
        Table,
        ProductOrderId,
        OrderId,
        ProductId,
        Quantity,
    }

    #[derive(DeriveIden)]
    enum Orders {
        Table,
        OrderId,
    }

    #[derive(DeriveIden)]
    enum Product {
        Table,
        ProductId,
    }
}
