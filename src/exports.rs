pub use {
    anyhow,
    bio,
    itertools,
    log,
    ndarray,
    polars,
    pretty_env_logger,
    rayon,
    serde,
    serde_json,
    statrs,
};
