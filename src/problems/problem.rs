use serde::{Deserialize, Serialize, Deserializer};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub title: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    pub difficulty: u32,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: BTreeSet<String>,
    #[serde(default, deserialize_with = "deserialize_description")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub est_time_min: Option<u32>,
}

fn default_category() -> String {
    "uncategorized".to_string()
}

fn default_topic() -> String {
    "unknown".to_string()
}

// Accepts `tags: [a, b]`, `tags: "a, b"` or `tags: ~`
fn deserialize_tags<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct TagsVisitor;

    impl<'de> Visitor<'de> for TagsVisitor {
        type Value = BTreeSet<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of tags or a comma-separated string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut tags = BTreeSet::new();
            while let Some(item) = seq.next_element::<serde_yaml::Value>()? {
                let tag = match item {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(de::Error::custom(format!("unsupported tag value: {:?}", other)));
                    }
                };
                let tag = tag.trim();
                if !tag.is_empty() {
                    tags.insert(tag.to_string());
                }
            }
            Ok(tags)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(BTreeSet::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(BTreeSet::new())
        }
    }

    deserializer.deserialize_any(TagsVisitor)
}

// Accepts a block string or a list of lines
fn deserialize_description<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct DescriptionVisitor;

    impl<'de> Visitor<'de> for DescriptionVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of lines")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut lines = Vec::new();
            while let Some(line) = seq.next_element::<String>()? {
                lines.push(line);
            }
            Ok(lines.join("\n"))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(DescriptionVisitor)
}

/// Ids name solution files, so they must stay inside one directory.
pub fn is_safe_id(id: &str) -> bool {
    !id.trim().is_empty() && !id.contains('/') && !id.contains('\\') && !id.contains("..")
}

impl Problem {
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|t| self.tags.contains(t.as_ref()))
    }

    /// Case-insensitive search over title, description and tags.
    pub fn mentions_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let haystack = format!(
            "{} {} {}",
            self.title,
            self.description,
            self.tags.iter().cloned().collect::<Vec<_>>().join(" ")
        )
        .to_lowercase();

        keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .any(|k| haystack.contains(&k))
    }

    pub fn tags_joined(&self) -> String {
        self.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    }

    /// Practice time for the countdown, falling back to `default_minutes`.
    pub fn minutes_or(&self, default_minutes: u32) -> u32 {
        self.est_time_min.unwrap_or(default_minutes)
    }
}
