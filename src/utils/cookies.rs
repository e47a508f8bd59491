// Acceso a document.cookie

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

/// Busca una cookie por nombre dentro de un header `a=1; b=2`
pub fn find_cookie(raw: &str, name: &str) -> Option<String> {
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn read_cookie(name: &str) -> Option<String> {
    let raw = html_document()?.cookie().ok()?;
    find_cookie(&raw, name)
}

pub fn write_cookie(name: &str, value: &str, max_age_seconds: u32) -> Result<(), String> {
    let document = html_document().ok_or("No se pudo acceder a document")?;
    let cookie = format!("{}={}; max-age={}; path=/; SameSite=Lax", name, value, max_age_seconds);
    document
        .set_cookie(&cookie)
        .map_err(|_| "Error guardando la cookie".to_string())
}

pub fn delete_cookie(name: &str) -> Result<(), String> {
    let document = html_document().ok_or("No se pudo acceder a document")?;
    let cookie = format!("{}=; max-age=0; path=/", name);
    document
        .set_cookie(&cookie)
        .map_err(|_| "Error eliminando la cookie".to_string())
}
