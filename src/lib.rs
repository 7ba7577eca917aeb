// This is src/lib.rs
#[macro_use]
pub mod log;

pub mod address;
pub mod api;
pub mod charset;
pub mod config;
pub mod engine;
pub mod generator;
pub mod perfect;
pub mod scheme;
pub mod search;

use wasm_bindgen::prelude::*;
use js_sys::{BigInt as JsBigInt, Date};
use serde::Serialize;
use std::sync::Arc;

use crate::api::{Failure, LcgPageRequest, PerfectPageRequest};
use crate::config::LibraryConfig;
use crate::engine::LcgEngine;
use crate::scheme::{LcgScheme, PerfectScheme};
use crate::search::SearchBudget;

pub use crate::address::Address;
pub use crate::perfect::PageId;
pub use crate::scheme::PageScheme;

#[cfg(feature = "console_error_panic_hook")]
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct Library {
    lcg: LcgScheme,
    perfect: PerfectScheme,
}

impl Library {
    pub fn from_config(config: &LibraryConfig) -> anyhow::Result<Library> {
        crate::log::set_verbose(config.verbose);
        let engine = if config.engine_params()? == LibraryConfig::default().engine_params()? {
            LcgEngine::standard()
        } else {
            Arc::new(LcgEngine::new(config.engine_params()?)?)
        };
        Ok(Library {
            lcg: LcgScheme::new(engine, SearchBudget::new(config.max_search_iterations)),
            perfect: PerfectScheme,
        })
    }

    pub fn lcg(&self) -> &LcgScheme {
        &self.lcg
    }

    pub fn perfect(&self) -> &PerfectScheme {
        &self.perfect
    }
}

impl Default for Library {
    fn default() -> Self {
        Library {
            lcg: LcgScheme::default(),
            perfect: PerfectScheme,
        }
    }
}

#[wasm_bindgen]
impl Library {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Library {
        Library::default()
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<Library, JsValue> {
        LibraryConfig::from_json(json)
            .and_then(|config| Library::from_config(&config))
            .map_err(|e| JsValue::from_str(&format!("Configuration Error: {:#}", e)))
    }

    #[wasm_bindgen(js_name = searchBudget)]
    pub fn search_budget(&self) -> f64 {
        self.lcg.budget().max_iterations as f64
    }

    #[wasm_bindgen(js_name = setSearchBudget)]
    pub fn set_search_budget(&mut self, max_iterations: f64) -> Result<(), JsValue> {
        if !max_iterations.is_finite() || max_iterations < 0.0 {
            return Err(JsValue::from_str("Search budget must be a non-negative number."));
        }
        self.lcg.set_max_iterations(max_iterations as u64);
        Ok(())
    }

    #[wasm_bindgen(js_name = lcgPage)]
    pub fn lcg_page(&self, request: JsValue) -> Result<JsValue, JsValue> {
        let request: LcgPageRequest = parse_request(request, api::PAGE_FAILURE)?;
        to_js(api::lcg_page(&self.lcg, &request))
    }

    #[wasm_bindgen(js_name = lcgSearch)]
    pub fn lcg_search(&self, query: Option<String>) -> Result<JsValue, JsValue> {
        let started = Date::now();
        let response = api::search(&self.lcg, query.as_deref());
        log!("search"; "lcg search took {:.0} ms", Date::now() - started);
        to_js(response)
    }

    /// Internal generator state of an address, for debugging views.
    #[wasm_bindgen(js_name = lcgState)]
    pub fn lcg_state(&self, request: JsValue) -> Result<JsBigInt, JsValue> {
        let request: LcgPageRequest = parse_request(request, api::PAGE_FAILURE)?;
        let address = request
            .to_address()
            .map_err(|e| JsValue::from_str(&format!("Address Error: {}", e)))?;
        let state = self.lcg.state_of(&address);
        JsBigInt::new(&JsValue::from_str(&state.to_string())).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = perfectPage)]
    pub fn perfect_page(&self, request: JsValue) -> Result<JsValue, JsValue> {
        let request: PerfectPageRequest = parse_request(request, api::PAGE_FAILURE)?;
        to_js(api::perfect_page(&self.perfect, &request))
    }

    #[wasm_bindgen(js_name = perfectSearch)]
    pub fn perfect_search(&self, query: Option<String>) -> Result<JsValue, JsValue> {
        to_js(api::search(&self.perfect, query.as_deref()))
    }
}

/// `undefined` / `null` count as an empty request.
fn parse_request<T>(request: JsValue, failure: &'static str) -> Result<T, JsValue>
where
    T: Default + serde::de::DeserializeOwned,
{
    if request.is_undefined() || request.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(request).map_err(|e| {
        warn!("api"; "unreadable request: {}", e);
        failure_to_js(&Failure { error: failure })
    })
}

fn to_js<T: Serialize>(result: Result<T, Failure>) -> Result<JsValue, JsValue> {
    match result {
        Ok(body) => serde_wasm_bindgen::to_value(&body)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize response: {}", e))),
        Err(failure) => Err(failure_to_js(&failure)),
    }
}

fn failure_to_js(failure: &Failure) -> JsValue {
    serde_wasm_bindgen::to_value(failure).unwrap_or_else(|_| JsValue::from_str(failure.error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reuses_standard_engine() {
        let library = Library::from_config(&LibraryConfig::default()).unwrap();
        assert_eq!(library.lcg().engine(), &*LcgEngine::standard());
        assert_eq!(library.lcg().budget().max_iterations, 50_000_000);
    }

    #[test]
    fn custom_config_builds_its_own_engine() {
        let config = LibraryConfig::from_json(
            r#"{"modulus": "1000003", "multiplier": "7", "increment": "11", "max_search_iterations": 10}"#,
        )
        .unwrap();
        let library = Library::from_config(&config).unwrap();
        assert_eq!(library.lcg().engine().modulus().to_string(), "1000003");
        assert_eq!(library.lcg().budget().max_iterations, 10);
        let content = library.lcg().page_content(&Address::first()).unwrap();
        assert_eq!(content.len(), 3200);
    }

    #[test]
    fn perfect_scheme_is_reachable() {
        let library = Library::default();
        let id = library.perfect().search_text("abc").unwrap().unwrap();
        assert!(library.perfect().page_content(&id).unwrap().starts_with("abc"));
    }
}
