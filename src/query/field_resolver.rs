use crate::{
    query::{ResolveError, escape},
    schema::{DefinitionProvider, EntityDefinition, Field},
};

/// Hard bound on association recursion. The finite schema graph bounds
/// well-formed paths long before this; the limit only catches
/// self-referencing schemas fed paths that never terminate.
pub const MAX_JOIN_DEPTH: usize = 16;

/// Strip a leading `root.` prefix from a field path, supporting both
/// bare and root-qualified input.
pub(crate) fn strip_root_prefix<'a>(field_name: &'a str, root: &str) -> &'a str {
    let prefix = format!("{root}.");
    field_name.strip_prefix(prefix.as_str()).unwrap_or(field_name)
}

/// Translates a logical dotted field path over the entity graph into an
/// escaped SQL column expression.
pub struct FieldResolver;

impl FieldResolver {
    /// Resolve `field_name` against `definition`, rooted at `root`.
    ///
    /// Walks one association per level, growing the root alias by the
    /// association's property name, until the remaining path names a
    /// storage-aware or translated field. The same original path is
    /// carried down the recursion, so multi-segment paths must be
    /// root-qualified (`product.categories.name`); bare input works for
    /// single-segment paths.
    ///
    /// Pure: identical inputs always yield the identical expression.
    pub fn resolve_column(
        field_name: &str,
        definition: &EntityDefinition,
        root: &str,
        provider: &dyn DefinitionProvider,
    ) -> Result<String, ResolveError> {
        Self::resolve_at(field_name, definition, root, provider, 0)
    }

    fn resolve_at(
        field_name: &str,
        definition: &EntityDefinition,
        root: &str,
        provider: &dyn DefinitionProvider,
        depth: usize,
    ) -> Result<String, ResolveError> {
        if depth > MAX_JOIN_DEPTH {
            return Err(ResolveError::DepthLimit { path: field_name.to_string() });
        }

        let local_name = strip_root_prefix(field_name, root);

        if let Some(field) = definition.fields.get(local_name) {
            if let Field::Translated { storage_name } = field {
                return Ok(format!(
                    "{}.{}",
                    escape(&format!("{root}.translation")),
                    escape(storage_name)
                ));
            }
            if let Some(storage_name) = field.storage_name() {
                return Ok(format!("{}.{}", escape(root), escape(storage_name)));
            }
        }

        let association = local_name.split('.').next().unwrap_or(local_name);

        let Some(field) = definition.fields.get(association) else {
            return Err(ResolveError::UnmappedField {
                field: field_name.to_string(),
                entity: definition.name.clone(),
            });
        };

        let Some(reference) = field.reference_entity() else {
            return Err(ResolveError::MissingReference {
                association: association.to_string(),
                entity: definition.name.clone(),
            });
        };

        let referenced = provider
            .definition_of(reference)
            .ok_or_else(|| ResolveError::UnknownEntity(reference.to_string()))?;

        Self::resolve_at(
            field_name,
            referenced,
            &format!("{root}.{association}"),
            provider,
            depth + 1,
        )
    }
}
