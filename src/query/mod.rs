pub mod container;
pub mod error;
pub mod media;

pub use container::{
    container_query_from_size, create_container_definition, create_container_queries,
    generate_container_query, generate_container_query_string, ContainerDefinition,
    ContainerName, ContainerQueryBuilder, ContainerQueryBuilderOptions, ContainerQueryCondition,
    ContainerQueryOptions, ContainerQueryType, ContainerSize, ContainerType,
};
pub use error::{QueryError, QueryResult};
pub use media::{
    create_media_queries, generate_media_query, MediaPreference, MediaQueryOptions,
    MediaQueryType, Orientation,
};
