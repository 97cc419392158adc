#[cfg(target_arch = "wasm32")]
use crate::i18n::bundle::with_bundle;
#[cfg(target_arch = "wasm32")]
use js_sys::{Function, Intl, Object};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// Format a number using the current locale via Intl
#[must_use]
pub fn fmt_number(num: f64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        with_bundle(|bundle| {
            let locales = js_sys::Array::new();
            locales.push(&JsValue::from_str(&bundle.lang));
            let nf = Intl::NumberFormat::new(&locales, &Object::new());
            let format_fn: Function = nf.format();
            format_fn
                .call1(&nf, &JsValue::from_f64(num))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| num.to_string())
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        group_thousands(num)
    }
}

/// Dollar amount with cents only when they are non-zero.
#[must_use]
pub fn fmt_currency(amount: f64) -> String {
    format!("${}", flashdeal_engine::format_price(amount))
}

#[cfg(not(target_arch = "wasm32"))]
fn group_thousands(num: f64) -> String {
    let raw = num.to_string();
    let (sign, rest) = raw.strip_prefix('-').map_or(("", raw.as_str()), |r| ("-", r));
    let (int_part, frac) = rest.split_once('.').map_or((rest, None), |(i, f)| (i, Some(f)));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_group_thousands() {
        assert_eq!(fmt_number(1250.0), "1,250");
        assert_eq!(fmt_number(12.0), "12");
        assert_eq!(fmt_number(-1_000_000.5), "-1,000,000.5");
    }

    #[test]
    fn currency_drops_zero_cents() {
        assert_eq!(fmt_currency(100.0), "$100");
        assert_eq!(fmt_currency(99.5), "$99.50");
    }
}
