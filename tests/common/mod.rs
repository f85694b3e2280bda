pub mod graphql_stub;
