use super::{sanitize, Namer, NamingConfig, NamingScheme};
use crate::source::{DeclId, SourceKind, SourceModel, SourceTable};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

pub struct HashingNamer<'a> {
    config: NamingConfig,
    sources: &'a SourceTable,
    /// Plain-scheme identifiers, unique across the table.
    plain_names: HashMap<DeclId, String>,
}

impl<'a> HashingNamer<'a> {
    pub fn new(sources: &'a SourceTable, config: NamingConfig) -> Self {
        let plain_names = match config.scheme {
            NamingScheme::Plain => disambiguate(sources),
            NamingScheme::Mangled => HashMap::new(),
        };
        Self {
            config,
            sources,
            plain_names,
        }
    }

    pub fn plain(sources: &'a SourceTable) -> Self {
        Self::new(sources, NamingConfig::default())
    }

    fn declared_name(&self, decl: DeclId) -> String {
        match self.sources.name(decl) {
            Some(name) => sanitize(name),
            None => format!("_decl{}", decl.0),
        }
    }

    fn scoped_name(&self, decl: DeclId) -> String {
        match self.config.scheme {
            NamingScheme::Plain => self
                .plain_names
                .get(&decl)
                .cloned()
                .unwrap_or_else(|| self.declared_name(decl)),
            NamingScheme::Mangled => {
                let name = self.declared_name(decl);
                let suffix = self.hash_suffix(decl, &name);
                format!("{}_{}", name, suffix)
            }
        }
    }

    fn hash_suffix(&self, decl: DeclId, name: &str) -> String {
        let mut hasher = Sha256::new();

        if let Some(salt) = &self.config.hash_salt {
            hasher.update(salt.as_bytes());
        }

        hasher.update(decl.0.to_le_bytes());
        hasher.update(name.as_bytes());
        let hash = hasher.finalize();

        format!("{:02x}{:02x}{:02x}", hash[0], hash[1], hash[2])
    }
}

/// Walks the table in insertion order. The first declaration keeps its
/// sanitized name, later ones reusing it get the first free `_N` suffix.
/// Properties are not bindings and take no part.
fn disambiguate(sources: &SourceTable) -> HashMap<DeclId, String> {
    let mut taken = HashSet::new();
    let mut names = HashMap::new();

    for (id, declaration) in &sources.declarations {
        if matches!(declaration.kind, SourceKind::Property(_)) {
            continue;
        }
        let base = sanitize(&declaration.name);
        let mut name = base.clone();
        let mut counter = 1;
        while taken.contains(&name) {
            name = format!("{}_{}", base, counter);
            counter += 1;
        }
        taken.insert(name.clone());
        names.insert(*id, name);
    }

    names
}

impl Namer for HashingNamer<'_> {
    fn static_name(&self, decl: DeclId) -> String {
        self.scoped_name(decl)
    }

    fn member_name(&self, decl: DeclId) -> String {
        self.scoped_name(decl)
    }

    fn property_name(&self, decl: DeclId) -> String {
        match self.sources.declaration(decl) {
            Some(declaration) => match &declaration.kind {
                SourceKind::Property(info) => info
                    .js_name
                    .clone()
                    .unwrap_or_else(|| declaration.name.clone()),
                _ => declaration.name.clone(),
            },
            None => format!("_decl{}", decl.0),
        }
    }
}
