use crate::{attributes::Attributes, engine::MarkupEngine, rule::Rule};

use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
struct RuleDef {
    opening: String,
    closing: String,
    #[serde(default)]
    attributes: Attributes,
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Rule, D::Error>
    where
        D: Deserializer<'de>,
    {
        let def = RuleDef::deserialize(deserializer)?;

        Rule::new(def.opening, def.closing, def.attributes).map_err(de::Error::custom)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Preset {
    Markdown,
    Markleft,
}

impl Preset {
    fn engine(&self) -> &'static MarkupEngine {
        match self {
            Self::Markdown => MarkupEngine::markdown(),
            Self::Markleft => MarkupEngine::markleft(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EngineDef {
    #[serde(default)]
    extends: Option<Preset>,
    #[serde(default)]
    rules: Vec<Rule>,
}

impl From<EngineDef> for MarkupEngine {
    fn from(engine_def: EngineDef) -> Self {
        let engine = MarkupEngine::new(engine_def.rules);

        match engine_def.extends {
            Some(preset) => preset.engine().extend(engine),
            None => engine,
        }
    }
}

impl<'de> Deserialize<'de> for MarkupEngine {
    fn deserialize<D>(deserializer: D) -> Result<MarkupEngine, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(EngineDef::deserialize(deserializer)?.into())
    }
}
