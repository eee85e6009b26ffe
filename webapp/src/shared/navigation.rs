/// Browser-history style back navigation.
pub trait History: Send + Sync {
    fn back(&self);
}

pub trait Router: Send + Sync {
    fn url(&self) -> String;
    fn navigate(&self, path: &str);
}
