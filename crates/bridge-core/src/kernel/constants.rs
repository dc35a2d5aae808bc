/// Application name
pub const APP_NAME: &str = "native-bridge";

/// Application version
pub const APP_VERSION: &str = "0.1.0";

/// Current bridge API version. Plugins declare the ranges they accept.
pub const API_VERSION: &str = "0.1.0";

/// Channel name of the data transfer plugin
pub const SUPER_DATA_TRANSFER_CHANNEL: &str = "super_data_transfer";

/// Channel name of the native extensions plugin
pub const SUPER_NATIVE_EXTENSIONS_CHANNEL: &str = "super_native_extensions";

/// Method answering with the identity of the registrar's native view
pub const METHOD_GET_FLUTTER_VIEW: &str = "getFlutterView";

/// Method answering with a textual OS version
pub const METHOD_GET_PLATFORM_VERSION: &str = "getPlatformVersion";

/// Suffix appended to a channel name to form its native initializer symbol
pub const INIT_SYMBOL_SUFFIX: &str = "_init";

/// Error code used when an inbound call cannot be decoded
pub const MALFORMED_CALL_CODE: &str = "malformed_call";
