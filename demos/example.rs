use layer_fnd::{printf, AppContext, ConfigStore, Value};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct Endpoint {
    name: String,
    port: u16,
    tags: Vec<String>,
}

fn main() -> Result<(), layer_fnd::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut ctx = AppContext::builder()
        .with_config(ConfigStore::new().with_directory("demos/config"))
        .with_sink(std::io::stdout())
        .build();

    // Resolved from demos/config/db.global.toml, then db.local.toml if present
    let host = ctx
        .config_mut()
        .get("db.host")?
        .cloned()
        .unwrap_or(Value::from("localhost"));
    let port = ctx.config_mut().get("db.port")?.cloned().unwrap_or(Value::Null);

    let printer = ctx.printer_mut();
    printf!(printer, "db at {}:{}\n\n", host, port)?;

    let endpoint = Endpoint {
        name: "api".into(),
        port: 8080,
        tags: vec!["public".into(), "v2".into()],
    };
    let value = Value::from_serialize(&endpoint).map_err(std::io::Error::other)?;
    printer.dump(&value, "")?;
    printf!(printer, "\n")?;

    let rows = [
        Value::mapping([("name", Value::from("api")), ("port", Value::from(8080))]),
        Value::mapping([("name", Value::from("admin"))]),
    ];
    printer.text_table(&rows)?;
    printer.flush()?;

    Ok(())
}
