//! SQL Server integration tests using testcontainers.
//!
//! These start a real SQL Server container and need Docker, so they are
//! ignored by default. Run with `cargo test -- --ignored`.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::uninlined_format_args)]

#[cfg(feature = "mssql")]
mod sqlserver_integration {
    use std::time::Duration;
    use tempfile::TempDir;
    use testcontainers_modules::{
        mssql_server::MssqlServer,
        testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner},
    };
    use tiberius::{Client, Config};
    use tokio::net::TcpStream;
    use tokio_util::compat::TokioAsyncWriteCompatExt;
    use txtsql_core::{
        CatalogSource, ConnectionString, ExportLayout, Exporter, ObjectCategory,
        SqlServerCatalog,
    };

    const SA_PASSWORD: &str = "Txtsql_Test_Pw1!";
    const WRONG_PASSWORD: &str = "Not_The_Sa_Pw_42";

    fn ado(port: u16, database: &str) -> String {
        format!(
            "Server=tcp:127.0.0.1,{};Database={};User Id=sa;Password={};TrustServerCertificate=true",
            port, database, SA_PASSWORD
        )
    }

    async fn execute(port: u16, database: &str, statements: &[&str]) {
        let config = Config::from_ado_string(&ado(port, database)).unwrap();
        let tcp = TcpStream::connect(config.get_addr()).await.unwrap();
        tcp.set_nodelay(true).unwrap();
        let mut client = Client::connect(config, tcp.compat_write()).await.unwrap();
        for statement in statements {
            client
                .execute(*statement, &[])
                .await
                .unwrap_or_else(|e| panic!("statement failed: {}: {}", statement, e));
        }
        client.close().await.unwrap();
    }

    async fn start_server() -> (ContainerAsync<MssqlServer>, u16) {
        let container = MssqlServer::default()
            .with_env_var("ACCEPT_EULA", "Y")
            .with_env_var("MSSQL_SA_PASSWORD", SA_PASSWORD)
            .start()
            .await
            .expect("Failed to start SQL Server container");

        let port = container
            .get_host_port_ipv4(1433)
            .await
            .expect("Failed to get port");

        execute(port, "master", &["CREATE DATABASE Inventory"]).await;
        execute(
            port,
            "Inventory",
            &[
                "CREATE TABLE Items (id int IDENTITY(1,1) NOT NULL, sku varchar(20) NOT NULL, notes nvarchar(max) NULL)",
                "CREATE VIEW vItems AS SELECT id, sku FROM Items",
                "CREATE PROCEDURE usp_CountItems AS SELECT COUNT(*) FROM Items",
                "CREATE FUNCTION fn_Twice(@x int) RETURNS int AS BEGIN RETURN @x * 2 END",
            ],
        )
        .await;

        (container, port)
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_integration_export_inventory_database() {
        let (_container, port) = start_server().await;
        let connection = ConnectionString::new(ado(port, "Inventory"));

        let mut catalog = SqlServerCatalog::connect(&connection, Duration::from_secs(60))
            .await
            .expect("Failed to connect");

        assert_eq!(catalog.database_name().await.unwrap(), "Inventory");
        assert!(catalog.server_version().await.unwrap().contains("SQL Server"));

        let temp = TempDir::new().unwrap();
        let summary = Exporter::new(temp.path())
            .export_database(&mut catalog)
            .await
            .expect("Export failed");
        catalog.close().await.expect("Failed to close connection");

        assert_eq!(summary.count(ObjectCategory::Table), 1);
        assert_eq!(summary.count(ObjectCategory::View), 1);
        assert_eq!(summary.count(ObjectCategory::StoredProcedure), 1);
        assert_eq!(summary.count(ObjectCategory::Function), 1);

        let layout = ExportLayout::new(temp.path(), "Inventory");
        let table =
            std::fs::read_to_string(layout.object_path(ObjectCategory::Table, "Items")).unwrap();
        assert!(table.starts_with("CREATE TABLE [Items] (\n"));
        assert!(table.contains("[id] int NOT NULL IDENTITY(1,1)"));
        assert!(table.contains("[sku] varchar(20) NOT NULL"));
        assert!(table.contains("[notes] nvarchar(MAX) NULL"));
        assert!(table.ends_with("\n);"));

        let view =
            std::fs::read_to_string(layout.object_path(ObjectCategory::View, "vItems")).unwrap();
        assert!(view.contains("CREATE VIEW vItems AS SELECT id, sku FROM Items"));

        let function = std::fs::read_to_string(
            layout.object_path(ObjectCategory::Function, "fn_Twice"),
        )
        .unwrap();
        assert!(function.contains("RETURN @x * 2"));
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_integration_unknown_object_definition_fails() {
        let (_container, port) = start_server().await;
        let connection = ConnectionString::new(ado(port, "Inventory"));

        let mut catalog = SqlServerCatalog::connect(&connection, Duration::from_secs(60))
            .await
            .unwrap();

        let result = catalog.definition_text("does_not_exist").await;
        assert!(result.is_err());
        catalog.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_integration_wrong_password_is_connection_error() {
        let (_container, port) = start_server().await;
        let connection = ConnectionString::new(format!(
            "Server=tcp:127.0.0.1,{};Database=Inventory;User Id=sa;Password={};TrustServerCertificate=true",
            port, WRONG_PASSWORD
        ));

        let result = SqlServerCatalog::connect(&connection, Duration::from_secs(60)).await;
        let error = result.err().expect("login should fail");
        assert!(matches!(error, txtsql_core::ExportError::Connection { .. }));
        assert!(!format!("{:?}", error).contains(WRONG_PASSWORD));
    }
}
