use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),
    #[error("query references unbound parameter `{0}`")]
    MissingParam(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
