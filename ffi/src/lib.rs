//! C-ABI wrapper around `catalog-core`.
//!
//! # Overview
//! Exposes the product catalog API through `extern "C"` functions so any
//! language with a C FFI can build and parse HTTP requests/responses without
//! linking to Rust's async runtime or serde directly. Mobile hosts keep their
//! own networking and screen stack; this layer gives them the same request
//! shapes, validation and error categories the Rust screens use.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiCatalogResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `catalog_free_*` function to release them.

pub mod types;

use std::os::raw::c_char;
use std::panic::catch_unwind;
use std::ptr;

use catalog_core::form::ProductForm;
use catalog_core::http::HttpResponse;
use catalog_core::types::{format_price, ProductId};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `ProductClient` bound to `base_url`.
///
/// Returns null if `base_url` is null, not UTF-8, or if an internal panic
/// occurs. The caller must free the returned pointer with `catalog_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_client_new(base_url: *const c_char) -> *mut FfiCatalogClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return ptr::null_mut();
        }
        let Some(url) = read_str(base_url) else {
            return ptr::null_mut();
        };
        let client = catalog_core::ProductClient::new(url);
        Box::into_raw(Box::new(FfiCatalogClient { inner: client }))
    })
    .unwrap_or(ptr::null_mut())
}

/// Free a client created by `catalog_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_client_free(client: *mut FfiCatalogClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build an HTTP request for listing all products.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `catalog_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_build_list_products(client: *const FfiCatalogClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_products())
    })
    .unwrap_or(ptr::null_mut())
}

/// Build an HTTP request for fetching a single product by id.
///
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_build_get_product(client: *const FfiCatalogClient, id: u64) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_get_product(ProductId(id)))
    })
    .unwrap_or(ptr::null_mut())
}

/// Build an HTTP request for creating a product.
///
/// Applies the same rules as the create screen: a blank title or a
/// non-finite price yields null, a blank image becomes the placeholder, and
/// `input.rating` is ignored in favour of a zero rating.
/// Returns null if `client` or `input` is null or any string is not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_build_create_product(
    client: *const FfiCatalogClient,
    input: *const FfiProductInput,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || input.is_null() {
            return ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(form) = read_form(unsafe { &*input }) else {
            return ptr::null_mut();
        };
        let Ok(draft) = form.to_new_product() else {
            return ptr::null_mut();
        };
        match client.inner.build_create_product(&draft) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => ptr::null_mut(),
        }
    })
    .unwrap_or(ptr::null_mut())
}

/// Build an HTTP request that replaces product `id` with `input`.
///
/// The whole record is sent, including `input.rating`; pass the rating the
/// product was loaded with to keep it. Returns null under the same
/// conditions as `catalog_build_create_product`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_build_update_product(
    client: *const FfiCatalogClient,
    id: u64,
    input: *const FfiProductInput,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || input.is_null() {
            return ptr::null_mut();
        }
        let client = unsafe { &*client };
        let input = unsafe { &*input };
        let Some(form) = read_form(input) else {
            return ptr::null_mut();
        };
        let Ok(product) = form.to_product(ProductId(id), input.rating.into()) else {
            return ptr::null_mut();
        };
        match client.inner.build_update_product(ProductId(id), &product) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => ptr::null_mut(),
        }
    })
    .unwrap_or(ptr::null_mut())
}

/// Build an HTTP request for deleting a product by id.
///
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_build_delete_product(client: *const FfiCatalogClient, id: u64) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_delete_product(ProductId(id)))
    })
    .unwrap_or(ptr::null_mut())
}

/// Read caller strings into a form so the core validation rules apply.
fn read_form(input: &FfiProductInput) -> Option<ProductForm> {
    Some(ProductForm {
        title: read_str(input.title)?.to_string(),
        price: input.price.to_string(),
        description: read_str(input.description)?.to_string(),
        category: read_str(input.category)?.to_string(),
        image: read_str(input.image)?.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Validate the shared `client` / `response` arguments and run `parse` on the
/// converted response.
fn parse_with(
    operation: &str,
    client: *const FfiCatalogClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&catalog_core::ProductClient, HttpResponse) -> *mut FfiCatalogResult,
) -> *mut FfiCatalogResult {
    catch_unwind(std::panic::AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiCatalogResult::null_arg("client");
        }
        if response.is_null() {
            return FfiCatalogResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let Some(body) = read_str(resp.body) else {
            return FfiCatalogResult::invalid_arg("response body is not UTF-8");
        };
        let core_resp = HttpResponse {
            status: resp.status,
            headers: Vec::new(),
            body: body.to_string(),
        };
        parse(&client.inner, core_resp)
    }))
    .unwrap_or_else(|_| FfiCatalogResult::panic(&format!("panic in {operation}")))
}

/// Parse an HTTP response from a list-products request.
///
/// Returns a result with `data_tag = ProductList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_parse_list_products(
    client: *const FfiCatalogClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCatalogResult {
    parse_with("catalog_parse_list_products", client, response, |c, resp| {
        match c.parse_list_products(resp) {
            Ok(products) => FfiCatalogResult::ok_product_list(products),
            Err(e) => FfiCatalogResult::from_error(e),
        }
    })
}

/// Parse an HTTP response from a get-product request.
///
/// Returns a result with `data_tag = Product` on success.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_parse_get_product(
    client: *const FfiCatalogClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCatalogResult {
    parse_with("catalog_parse_get_product", client, response, |c, resp| {
        match c.parse_get_product(resp) {
            Ok(product) => FfiCatalogResult::ok_product(product),
            Err(e) => FfiCatalogResult::from_error(e),
        }
    })
}

/// Parse an HTTP response from a create-product request.
///
/// Returns a result with `data_tag = Product` carrying the server-assigned id.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_parse_create_product(
    client: *const FfiCatalogClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCatalogResult {
    parse_with("catalog_parse_create_product", client, response, |c, resp| {
        match c.parse_create_product(resp) {
            Ok(product) => FfiCatalogResult::ok_product(product),
            Err(e) => FfiCatalogResult::from_error(e),
        }
    })
}

/// Parse an HTTP response from an update-product request.
///
/// Returns a result with `data_tag = Product` on success.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_parse_update_product(
    client: *const FfiCatalogClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCatalogResult {
    parse_with("catalog_parse_update_product", client, response, |c, resp| {
        match c.parse_update_product(resp) {
            Ok(product) => FfiCatalogResult::ok_product(product),
            Err(e) => FfiCatalogResult::from_error(e),
        }
    })
}

/// Parse an HTTP response from a delete-product request.
///
/// Any 2xx is success with `data_tag = None`; the body is not inspected.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_parse_delete_product(
    client: *const FfiCatalogClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCatalogResult {
    parse_with("catalog_parse_delete_product", client, response, |c, resp| {
        match c.parse_delete_product(resp) {
            Ok(()) => FfiCatalogResult::ok_empty(),
            Err(e) => FfiCatalogResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Render a price the way the catalog screens show it, e.g. `$12.50`.
/// Free the result with `catalog_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_format_price(price: f64) -> *mut c_char {
    catch_unwind(|| c_string(format_price(price))).unwrap_or(ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `catalog_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        for header in from_raw_array(req.headers, req.headers_len) {
            free_c_string(header.key);
            free_c_string(header.value);
        }
    });
}

/// Free an `FfiCatalogResult` returned by any `catalog_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_free_result(result: *mut FfiCatalogResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Product => {
                let product = unsafe { Box::from_raw(result.data as *mut FfiProduct) };
                product.free_fields();
            }
            FfiDataTag::ProductList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiProductList) };
                for item in from_raw_array(list.items, list.len) {
                    item.free_fields();
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
