//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use catalog_core::error::TransportError;
use catalog_core::http::HttpMethod;
use catalog_core::types::{Product, Rating};

/// Opaque handle to a `ProductClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiCatalogClient {
    pub(crate) inner: catalog_core::ProductClient,
}

/// Copy a Rust string into a freshly allocated C string. Interior NULs are
/// dropped rather than failing the whole call.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut s = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

/// Borrow a caller-owned C string. Null reads as `Some("")`; invalid UTF-8 as `None`.
pub(crate) fn read_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return Some("");
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

/// Release a C string produced by `c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `catalog_build_*` functions. The C caller executes the request
/// and passes the response back through `catalog_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: catalog_core::HttpRequest) -> *mut Self {
        let body = req.body.map_or(ptr::null_mut(), c_string);
        let headers_len = req.headers.len() as u32;
        let headers = into_raw_array(
            req.headers
                .into_iter()
                .map(|(key, value)| FfiHeader {
                    key: c_string(key),
                    value: c_string(value),
                })
                .collect(),
        );

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body,
        }))
    }
}

/// Caller-supplied product fields for `catalog_build_create_product` and
/// `catalog_build_update_product`. Null strings read as empty.
#[repr(C)]
pub struct FfiProductInput {
    pub title: *const c_char,
    pub price: f64,
    pub description: *const c_char,
    pub category: *const c_char,
    pub image: *const c_char,
    pub rating: FfiRating,
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `catalog_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiCatalogResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Status = 1,
    Network = 2,
    Decode = 3,
    Encode = 4,
    Panic = 5,
    NullArg = 6,
    InvalidArg = 7,
}

/// Tag that tells `catalog_free_result` what `FfiCatalogResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Product = 1,
    ProductList = 2,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FfiRating {
    pub rate: f64,
    pub count: u32,
}

impl From<Rating> for FfiRating {
    fn from(r: Rating) -> Self {
        FfiRating {
            rate: r.rate,
            count: r.count,
        }
    }
}

impl From<FfiRating> for Rating {
    fn from(r: FfiRating) -> Self {
        Rating {
            rate: r.rate,
            count: r.count,
        }
    }
}

/// A single product exposed to C.
#[repr(C)]
pub struct FfiProduct {
    pub id: u64,
    pub title: *mut c_char,
    pub price: f64,
    pub description: *mut c_char,
    pub category: *mut c_char,
    pub image: *mut c_char,
    pub rating: FfiRating,
}

impl FfiProduct {
    fn from_core(p: Product) -> Self {
        FfiProduct {
            id: p.id.0,
            title: c_string(p.title),
            price: p.price,
            description: c_string(p.description),
            category: c_string(p.category),
            image: c_string(p.image),
            rating: p.rating.into(),
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        free_c_string(self.title);
        free_c_string(self.description);
        free_c_string(self.category);
        free_c_string(self.image);
    }
}

/// A list of products exposed to C.
#[repr(C)]
pub struct FfiProductList {
    pub items: *mut FfiProduct,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiCatalogResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiCatalogResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiCatalogResult {
            error_code: FfiErrorCode::Ok,
            error_message: ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn error(error_code: FfiErrorCode, http_status: u16, message: String) -> *mut Self {
        Box::into_raw(Box::new(FfiCatalogResult {
            error_code,
            error_message: c_string(message),
            http_status,
            data_tag: FfiDataTag::None,
            data: ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a single `FfiProduct`.
    pub(crate) fn ok_product(product: Product) -> *mut Self {
        let product = Box::new(FfiProduct::from_core(product));
        Self::ok(FfiDataTag::Product, Box::into_raw(product) as *mut c_void)
    }

    /// Build a success result carrying a `FfiProductList`.
    pub(crate) fn ok_product_list(products: Vec<Product>) -> *mut Self {
        let len = products.len() as u32;
        let items = into_raw_array(products.into_iter().map(FfiProduct::from_core).collect());
        let list = Box::new(FfiProductList { items, len });
        Self::ok(FfiDataTag::ProductList, Box::into_raw(list) as *mut c_void)
    }

    /// Build a success result with no data payload (delete).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::ok(FfiDataTag::None, ptr::null_mut())
    }

    pub(crate) fn from_error(err: TransportError) -> *mut Self {
        let (code, status) = match &err {
            TransportError::Status { status, .. } => (FfiErrorCode::Status, *status),
            TransportError::Network(_) => (FfiErrorCode::Network, 0),
            TransportError::Decode(_) => (FfiErrorCode::Decode, 0),
            TransportError::Encode(_) => (FfiErrorCode::Encode, 0),
        };
        Self::error(code, status, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn invalid_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::InvalidArg, 0, format!("invalid argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, 0, msg.to_string())
    }
}

/// Leak a vector as a bare pointer whose capacity equals `len`. Empty vectors
/// become null.
fn into_raw_array<T>(items: Vec<T>) -> *mut T {
    if items.is_empty() {
        return ptr::null_mut();
    }
    Box::into_raw(items.into_boxed_slice()) as *mut T
}

/// Reclaim an array produced by `into_raw_array`.
pub(crate) fn from_raw_array<T>(items: *mut T, len: u32) -> Vec<T> {
    if items.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = ptr::slice_from_raw_parts_mut(items, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}
