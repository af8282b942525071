pub mod create_repository_builder;
pub mod upload_files_builder;

pub trait BuilderExecutor {
    type Output;

    async fn execute(self) -> Self::Output;
}
