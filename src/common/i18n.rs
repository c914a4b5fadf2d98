// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

use anyhow::Context;

pub const DEFAULT_LANG: &str = "en";

// Catálogos embutidos no binário: idioma -> (chave -> mensagem).
const CATALOGS: [(&str, &str); 3] = [
    ("en", include_str!("../../locales/en.json")),
    ("zh", include_str!("../../locales/zh.json")),
    ("pt", include_str!("../../locales/pt.json")),
];

#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("catálogo de mensagens '{lang}' inválido"))?;
            catalogs.insert(lang.to_string(), messages);
        }
        Ok(Self { catalogs: Arc::new(catalogs) })
    }

    /// Traduz `key` para `lang`, caindo para o inglês e, por fim, para a própria chave.
    /// Os argumentos substituem marcadores `{nome}` na mensagem.
    pub fn translate(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        let template = self
            .catalogs
            .get(lang)
            .and_then(|messages| messages.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|m| m.get(key)))
            .map(String::as_str)
            .unwrap_or(key);

        args.iter().fold(template.to_string(), |message, (name, value)| {
            message.replace(&format!("{{{name}}}"), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_has_the_same_keys() {
        let store = I18nStore::load().unwrap();
        let mut reference: Vec<_> = store.catalogs[DEFAULT_LANG].keys().collect();
        reference.sort();
        for (lang, messages) in store.catalogs.iter() {
            let mut keys: Vec<_> = messages.keys().collect();
            keys.sort();
            assert_eq!(keys, reference, "chaves divergentes no catálogo '{lang}'");
        }
    }

    #[test]
    fn translate_interpolates_and_falls_back() {
        let store = I18nStore::load().unwrap();

        assert_eq!(store.translate("zh", "error.username_taken", &[]), "用户已存在");
        assert_eq!(
            store.translate("en", "error.already_exists", &[("field", "rfid")]),
            "An entry with this rfid already exists."
        );
        // idioma desconhecido -> inglês
        assert_eq!(
            store.translate("fr", "error.no_users_found", &[]),
            "No users found."
        );
        // chave desconhecida -> a própria chave
        assert_eq!(store.translate("en", "missing.key", &[]), "missing.key");
    }
}
