// Infrastructure: database access, dependency container, migrations

pub mod deps;
pub mod migrations;
pub mod pg_gateway;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use pg_gateway::PgGateway;
pub use traits::{BaseGateway, GatewayError, GatewayResult};
