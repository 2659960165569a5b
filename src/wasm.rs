// WebAssembly bindings for the codecs and the editable input
use crate::codec::{
    format_float, format_percent, format_si, parse_float, parse_percent, parse_si, CodecKind,
    FloatFormatOptions, FloatParseOptions, FloatSettings, NumericCodec, PercentFormatOptions,
    SiFormatOptions, SiParseOptions,
};
use crate::error::NumfieldError;
use crate::field::{FormattedInput, InputEvent, SharedInput};
use js_sys::Function;
use tracing::warn;
use wasm_bindgen::prelude::*;

fn to_js_error(e: NumfieldError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse free-form text as a float; unparseable text yields 0
#[wasm_bindgen(js_name = parseValueFloat)]
pub fn parse_value_float(
    s: &str,
    ignore_chars: Option<String>,
    decimal_point: Option<String>,
) -> Result<f64, JsValue> {
    let defaults = FloatSettings::default();
    let options = if ignore_chars.is_none() && decimal_point.is_none() {
        FloatParseOptions::default()
    } else {
        FloatParseOptions::from_patterns(
            ignore_chars.as_deref().unwrap_or(&defaults.ignore_chars),
            decimal_point
                .as_deref()
                .unwrap_or(&defaults.decimal_point_chars),
        )
        .map_err(to_js_error)?
    };
    Ok(parse_float(s, &options))
}

#[wasm_bindgen(js_name = formatValueFloat)]
pub fn format_value_float(
    value: f64,
    decimals: Option<u32>,
    thousand_sep: Option<String>,
    decimal_point: Option<String>,
    explicit_plus: Option<bool>,
) -> String {
    let defaults = FloatFormatOptions::default();
    let options = FloatFormatOptions {
        decimals: decimals.map(|d| d as usize).unwrap_or(defaults.decimals),
        thousand_sep: thousand_sep.unwrap_or(defaults.thousand_sep),
        decimal_point: decimal_point.unwrap_or(defaults.decimal_point),
        explicit_plus: explicit_plus.unwrap_or(defaults.explicit_plus),
    };
    format_float(value, &options)
}

#[wasm_bindgen(js_name = parseValuePercent)]
pub fn parse_value_percent(s: &str) -> f64 {
    parse_percent(s)
}

#[wasm_bindgen(js_name = formatValuePercent)]
pub fn format_value_percent(value: f64, decimals: Option<u32>) -> String {
    let options = decimals
        .map(|d| PercentFormatOptions {
            decimals: d as usize,
        })
        .unwrap_or_default();
    format_percent(value, &options)
}

/// Returns `undefined` for text that is not an SI number, `emptyValue`
/// (default NaN) for empty text
#[wasm_bindgen(js_name = parseValueSi)]
pub fn parse_value_si(s: &str, empty_value: Option<f64>) -> Option<f64> {
    let options = SiParseOptions {
        empty_value: empty_value.unwrap_or(f64::NAN),
    };
    parse_si(s, &options)
}

/// `null`/`undefined` formats as an empty string
#[wasm_bindgen(js_name = formatValueSi)]
pub fn format_value_si(value: Option<f64>, significant_digits: Option<u32>) -> String {
    let options = significant_digits
        .map(|d| SiFormatOptions {
            significant_digits: d as usize,
        })
        .unwrap_or_default();
    value.map(|v| format_si(v, &options)).unwrap_or_default()
}

/// Editable numeric input driven from JavaScript events.
///
/// Callbacks run after the input has finished handling the event, so
/// `onChange` may call `setValue` on the same input to accept the value.
/// An exception thrown by a callback propagates out of the `handle*` call.
#[wasm_bindgen(js_name = FormattedInput)]
pub struct FormattedInputWasm {
    inner: SharedInput<Option<f64>>,
    on_change: Option<Function>,
    on_focus: Option<Function>,
    on_blur: Option<Function>,
}

impl FormattedInputWasm {
    fn dispatch(&self, event: InputEvent<Option<f64>>) -> Result<(), JsValue> {
        let result = match event {
            InputEvent::Change(v) => self.on_change.as_ref().map(|f| {
                let arg = v.map(JsValue::from_f64).unwrap_or(JsValue::UNDEFINED);
                f.call1(&JsValue::NULL, &arg)
            }),
            InputEvent::Focus => self.on_focus.as_ref().map(|f| f.call0(&JsValue::NULL)),
            InputEvent::Blur => self.on_blur.as_ref().map(|f| f.call0(&JsValue::NULL)),
        };
        match result {
            Some(Err(e)) => {
                warn!(error = ?e, "input callback threw");
                Err(e)
            }
            _ => Ok(()),
        }
    }
}

#[wasm_bindgen(js_class = FormattedInput)]
impl FormattedInputWasm {
    /// `codec` is "float", "percent" or "si". `onChange` receives the parsed
    /// number, or `undefined` when the text is not parseable.
    #[wasm_bindgen(constructor)]
    pub fn new(
        codec: &str,
        value: Option<f64>,
        on_change: Option<Function>,
        on_focus: Option<Function>,
        on_blur: Option<Function>,
    ) -> Result<FormattedInputWasm, JsValue> {
        let kind: CodecKind = codec.parse().map_err(to_js_error)?;
        let codec: NumericCodec = kind.default_spec().build().map_err(to_js_error)?;

        Ok(Self {
            inner: SharedInput::new(FormattedInput::with_codec(value, codec)),
            on_change,
            on_focus,
            on_blur,
        })
    }

    /// Text the input element should display
    pub fn text(&self) -> String {
        self.inner.text()
    }

    pub fn value(&self) -> Option<f64> {
        self.inner.value()
    }

    /// Safe to call from inside `onChange`
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, value: Option<f64>) {
        self.inner.set_value(value);
    }

    #[wasm_bindgen(js_name = isEditing)]
    pub fn is_editing(&self) -> bool {
        self.inner.is_editing()
    }

    #[wasm_bindgen(js_name = handleChange)]
    pub fn handle_change(&self, text: &str) -> Result<(), JsValue> {
        self.inner.handle_change(text, |event| self.dispatch(event))
    }

    #[wasm_bindgen(js_name = handleFocus)]
    pub fn handle_focus(&self) -> Result<(), JsValue> {
        self.inner.handle_focus(|event| self.dispatch(event))
    }

    #[wasm_bindgen(js_name = handleBlur)]
    pub fn handle_blur(&self) -> Result<(), JsValue> {
        self.inner.handle_blur(|event| self.dispatch(event))
    }
}
