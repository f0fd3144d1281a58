// Static framework knowledge embedded into the binary

use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use indexmap::IndexMap;
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{
    Checklist, ClassIndex, ClassInfo, ClassListing, ClassSummary, DocEntry, DocIndex, DocRecord,
    DocSearchHit, DocSearchResult, PatternEntry, PatternIndex, PatternRecord, RuleRecord, RuleSet,
};

#[derive(RustEmbed)]
#[folder = "data/"]
struct KnowledgeAssets;

/// Rule category that selects every rule
pub const ALL_RULES: &str = "all";

const EXCERPT_CHARS: usize = 200;

/// Read-only knowledge base loaded once at startup
///
/// Records keep the order of their source files; the derived indexes group them
/// by category.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    classes: Vec<ClassInfo>,
    class_lookup: HashMap<String, usize>,
    class_index: ClassIndex,
    docs: Vec<DocRecord>,
    doc_lookup: HashMap<String, usize>,
    doc_index: DocIndex,
    rules: Vec<RuleRecord>,
    checklist: Checklist,
    patterns: Vec<PatternRecord>,
    pattern_lookup: HashMap<String, usize>,
    pattern_index: PatternIndex,
}

impl KnowledgeBase {
    /// Parse the embedded data files
    pub fn load() -> CoreResult<Self> {
        let classes: Vec<ClassInfo> = read_asset("classes.json")?;
        let docs: Vec<DocRecord> = read_asset("docs.json")?;
        let rules: Vec<RuleRecord> = read_asset("rules.json")?;
        let checklist: Checklist = read_asset("checklist.json")?;
        let patterns: Vec<PatternRecord> = read_asset("patterns.json")?;

        let kb = Self::from_records(classes, docs, rules, checklist, patterns);
        tracing::info!(
            classes = kb.classes.len(),
            docs = kb.docs.len(),
            rules = kb.rules.len(),
            patterns = kb.patterns.len(),
            "Loaded knowledge base"
        );
        Ok(kb)
    }

    pub fn from_records(
        classes: Vec<ClassInfo>,
        docs: Vec<DocRecord>,
        rules: Vec<RuleRecord>,
        checklist: Checklist,
        patterns: Vec<PatternRecord>,
    ) -> Self {
        let class_lookup = lookup(&classes, |c| &c.name);
        let doc_lookup = lookup(&docs, |d| &d.slug);
        let pattern_lookup = lookup(&patterns, |p| &p.pattern_type);

        let class_index = build_class_index(&classes);
        let doc_index = build_doc_index(&docs);
        let pattern_index = build_pattern_index(&patterns);

        Self {
            classes,
            class_lookup,
            class_index,
            docs,
            doc_lookup,
            doc_index,
            rules,
            checklist,
            patterns,
            pattern_lookup,
            pattern_index,
        }
    }

    // Classes

    pub fn class_index(&self) -> &ClassIndex {
        &self.class_index
    }

    /// Class index narrowed to one category, or `None` for an unknown category
    pub fn class_listing(&self, category: &str) -> Option<ClassListing> {
        let names = self.class_index.categories.get(category)?;
        Some(ClassListing {
            total: names.len(),
            classes: self
                .class_index
                .classes
                .iter()
                .filter(|c| c.category == category)
                .cloned()
                .collect(),
        })
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassInfo> {
        self.class_lookup.get(name).map(|&i| &self.classes[i])
    }

    /// Class record keeping only methods whose name contains `filter` (case-insensitive)
    pub fn get_class_filtered(&self, name: &str, filter: &str) -> Option<ClassInfo> {
        let mut class = self.get_class(name)?.clone();
        let needle = filter.to_lowercase();
        class
            .methods
            .retain(|m| m.name.to_lowercase().contains(&needle));
        Some(class)
    }

    // Docs

    pub fn doc_index(&self) -> &DocIndex {
        &self.doc_index
    }

    pub fn get_doc(&self, slug: &str) -> Option<&DocRecord> {
        self.doc_lookup.get(slug).map(|&i| &self.docs[i])
    }

    /// Case-insensitive substring search over doc titles and slugs
    ///
    /// `total` counts every match; `results` holds at most `limit` of them.
    pub fn search_docs(&self, query: &str, limit: usize) -> DocSearchResult {
        let needle = query.to_lowercase();

        let matched: Vec<(&str, &DocEntry)> = self
            .doc_index
            .categories
            .iter()
            .flat_map(|(category, entries)| entries.iter().map(move |e| (category.as_str(), e)))
            .filter(|(_, e)| {
                e.title.to_lowercase().contains(&needle) || e.slug.to_lowercase().contains(&needle)
            })
            .collect();

        let results = matched
            .iter()
            .take(limit)
            .map(|(category, entry)| DocSearchHit {
                slug: entry.slug.clone(),
                title: entry.title.clone(),
                category: category.to_string(),
                excerpt: self
                    .get_doc(&entry.slug)
                    .map(|doc| excerpt(&doc.content))
                    .unwrap_or_default(),
            })
            .collect();

        DocSearchResult {
            query: query.to_string(),
            total: matched.len(),
            results,
        }
    }

    // Rules

    /// Rules in `category`; `"all"` selects every rule, an unknown category gives `None`
    pub fn get_rules(&self, category: &str) -> Option<RuleSet> {
        let rules: Vec<RuleRecord> = if category == ALL_RULES {
            self.rules.clone()
        } else {
            self.rules
                .iter()
                .filter(|r| r.category == category)
                .cloned()
                .collect()
        };

        if rules.is_empty() && category != ALL_RULES {
            return None;
        }

        Some(RuleSet {
            total: rules.len(),
            rules,
        })
    }

    pub fn get_rule(&self, id: &str) -> Option<&RuleRecord> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    // Patterns

    pub fn pattern_index(&self) -> &PatternIndex {
        &self.pattern_index
    }

    pub fn get_pattern(&self, pattern_type: &str) -> Option<&PatternRecord> {
        self.pattern_lookup
            .get(pattern_type)
            .map(|&i| &self.patterns[i])
    }
}

fn read_asset<T: DeserializeOwned>(name: &str) -> CoreResult<T> {
    let file =
        KnowledgeAssets::get(name).ok_or_else(|| CoreError::MissingAsset(name.to_string()))?;
    serde_json::from_slice(&file.data).map_err(|source| CoreError::InvalidAsset {
        name: name.to_string(),
        source,
    })
}

fn lookup<T>(records: &[T], key: impl Fn(&T) -> &String) -> HashMap<String, usize> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| (key(r).clone(), i))
        .collect()
}

fn build_class_index(classes: &[ClassInfo]) -> ClassIndex {
    let mut categories: IndexMap<String, Vec<String>> = IndexMap::new();
    for class in classes {
        categories
            .entry(class.category.clone())
            .or_default()
            .push(class.name.clone());
    }

    ClassIndex {
        total: classes.len(),
        categories,
        classes: classes
            .iter()
            .map(|c| ClassSummary {
                name: c.name.clone(),
                category: c.category.clone(),
                description: c.description.clone(),
                variable_name: c.variable_name.clone(),
                method_count: c.methods.len(),
            })
            .collect(),
    }
}

fn build_doc_index(docs: &[DocRecord]) -> DocIndex {
    let mut categories: IndexMap<String, Vec<DocEntry>> = IndexMap::new();
    for doc in docs {
        categories
            .entry(doc.category.clone())
            .or_default()
            .push(DocEntry {
                slug: doc.slug.clone(),
                title: doc.title.clone(),
            });
    }

    DocIndex {
        total: docs.len(),
        categories,
    }
}

fn build_pattern_index(patterns: &[PatternRecord]) -> PatternIndex {
    let mut categories: IndexMap<String, Vec<PatternEntry>> = IndexMap::new();
    for pattern in patterns {
        categories
            .entry(pattern.category.clone())
            .or_default()
            .push(PatternEntry {
                pattern_type: pattern.pattern_type.clone(),
                title: pattern.title.clone(),
                description: pattern.description.clone(),
            });
    }

    PatternIndex {
        total: patterns.len(),
        categories,
    }
}

/// First 200 characters of `content` followed by an ellipsis
fn excerpt(content: &str) -> String {
    let mut out: String = content.chars().take(EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}
