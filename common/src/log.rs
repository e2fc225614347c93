/// Target used for events that report a successful milestone.
///
/// The terminal formatter renders these with a distinct symbol. Must match
/// the literal inside [`success!`](crate::success).
pub const SUCCESS_TARGET: &str = "sweepr::success";

/// Target used for raw console output that must bypass the level symbols.
pub const PRINT_TARGET: &str = "sweepr::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "sweepr::success", $($arg)*)
    };
}
