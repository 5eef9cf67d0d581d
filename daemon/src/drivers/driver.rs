use super::Drivers;

/// A long-running serving surface owned by the app shell.
#[async_trait::async_trait]
pub trait Driver: Send + Sync {
    async fn run(&self);

    fn driver_type(&self) -> Drivers;
}
