use crate::interop::{new_obj, set_kv};
use sitebound::{ConfigError, DraftError, EditError, InputError, JsonError, ValidationError};
use wasm_bindgen::JsValue;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

/// Core errors carry a stable code for the result objects.
pub trait Coded: std::fmt::Display {
    fn code(&self) -> &'static str;
}

macro_rules! coded {
    ($($t:ty),*) => {$(
        impl Coded for $t {
            fn code(&self) -> &'static str { <$t>::code(self) }
        }
    )*};
}
coded!(ValidationError, EditError, InputError, DraftError, ConfigError, JsonError);

pub fn from_core(e: &impl Coded) -> JsValue {
    err(e.code(), e.to_string(), None)
}

/// Validation failures report each problem under `data.problems`.
pub fn invalid_boundary(problems: &[ValidationError]) -> JsValue {
    let list = js_sys::Array::new();
    for p in problems {
        let item = new_obj();
        set_kv(&item, "code", &JsValue::from_str(p.code()));
        set_kv(&item, "message", &JsValue::from_str(&p.to_string()));
        list.push(&item.into());
    }
    let d = new_obj();
    set_kv(&d, "problems", &list.into());
    err("invalid_boundary", format!("boundary failed validation with {} problem(s)", problems.len()), Some(d.into()))
}

pub fn draft(e: &DraftError) -> JsValue {
    match e {
        DraftError::Invalid(problems) => invalid_boundary(problems),
        other => from_core(other),
    }
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

pub fn json_parse(e: impl std::fmt::Display) -> JsValue {
    err("json_parse", e.to_string(), None)
}
