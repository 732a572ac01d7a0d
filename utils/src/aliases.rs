/// `Send` if the `parallel` feature enabled
#[cfg(feature = "parallel")]
pub trait SendIfParallel: Send {}
#[cfg(feature = "parallel")]
impl<T: Send> SendIfParallel for T {}

/// `Send` if the `parallel` feature enabled
#[cfg(not(feature = "parallel"))]
pub trait SendIfParallel {}
#[cfg(not(feature = "parallel"))]
impl<T> SendIfParallel for T {}
