use tracing::trace;

use crate::{
    query::{
        MAX_JOIN_DEPTH, ParamValue, QueryBuilder, ResolveError, TranslationContext, escape,
        field_resolver::strip_root_prefix,
    },
    schema::{DefinitionProvider, EntityDefinition, Field},
};

/// State flag set on a query once any to-many join exists. Downstream
/// consumers use it to decide whether result rows need de-duplication
/// by primary key.
pub const HAS_TO_MANY_JOIN: &str = "has_to_many_join";

const LOCALE_PARAM: &str = "localeId";
const FALLBACK_LOCALE_PARAM: &str = "fallbackLocaleId";

/// Emits the left joins required to make a dotted field path reachable,
/// deduplicated through the query's per-alias state flags.
pub struct JoinBuilder;

impl JoinBuilder {
    /// Make `field_name` reachable from `root` by joining every
    /// association along the path.
    ///
    /// Unknown path segments are tolerated without effect: filter and
    /// sort compilation probe speculative paths through here, and only
    /// the resolver treats an unmapped field as an error. A field in
    /// association position that carries no usable target definition is
    /// still fatal.
    pub fn join_field(
        field_name: &str,
        definition: &EntityDefinition,
        root: &str,
        query: &mut dyn QueryBuilder,
        provider: &dyn DefinitionProvider,
        context: &TranslationContext,
    ) -> Result<(), ResolveError> {
        Self::join_at(field_name, definition, root, query, provider, context, 0)
    }

    fn join_at(
        field_name: &str,
        definition: &EntityDefinition,
        root: &str,
        query: &mut dyn QueryBuilder,
        provider: &dyn DefinitionProvider,
        context: &TranslationContext,
        depth: usize,
    ) -> Result<(), ResolveError> {
        if depth > MAX_JOIN_DEPTH {
            return Err(ResolveError::DepthLimit { path: field_name.to_string() });
        }

        let local_name = strip_root_prefix(field_name, root);

        if let Some(field) = definition.fields.get(local_name) {
            if field.is_translated() {
                Self::join_translation(root, definition, query, context);
            }
            return Ok(());
        }

        let association = local_name.split('.').next().unwrap_or(local_name);

        let Some(field) = definition.fields.get(association) else {
            // Speculative path; tolerated without a join.
            return Ok(());
        };

        let referenced = match field {
            Field::ManyToOne { reference, storage_name, reference_field } => {
                let referenced = Self::referenced(provider, reference)?;
                Self::join_many_to_one(root, association, storage_name, reference_field, referenced, query);
                referenced
            }
            Field::OneToMany { reference, local_field, reference_field } => {
                let referenced = Self::referenced(provider, reference)?;
                Self::join_one_to_many(root, association, local_field, reference_field, referenced, query);
                query.add_state(HAS_TO_MANY_JOIN);
                referenced
            }
            Field::ManyToMany {
                mapping,
                reference,
                mapping_local_column,
                mapping_reference_column,
            } => {
                let bridge = Self::referenced(provider, mapping)?;
                let referenced = Self::referenced(provider, reference)?;
                Self::join_many_to_many(
                    root,
                    association,
                    mapping_local_column,
                    mapping_reference_column,
                    bridge,
                    referenced,
                    query,
                );
                query.add_state(HAS_TO_MANY_JOIN);
                referenced
            }
            Field::Storage { .. } | Field::Translated { .. } => {
                return Err(ResolveError::MissingReference {
                    association: association.to_string(),
                    entity: definition.name.clone(),
                });
            }
        };

        Self::join_at(
            field_name,
            referenced,
            &format!("{root}.{association}"),
            query,
            provider,
            context,
            depth + 1,
        )
    }

    fn referenced<'a>(
        provider: &'a dyn DefinitionProvider,
        entity: &str,
    ) -> Result<&'a EntityDefinition, ResolveError> {
        provider
            .definition_of(entity)
            .ok_or_else(|| ResolveError::UnknownEntity(entity.to_string()))
    }

    fn join_many_to_one(
        root: &str,
        property: &str,
        storage_name: &str,
        reference_field: &str,
        referenced: &EntityDefinition,
        query: &mut dyn QueryBuilder,
    ) {
        let alias = format!("{root}.{property}");
        if query.has_state(&alias) {
            return;
        }
        query.add_state(&alias);

        trace!(alias = %alias, table = %referenced.name, "join many-to-one");
        query.left_join(
            &escape(root),
            &escape(&referenced.name),
            &escape(&alias),
            &format!(
                "{}.{} = {}.{}",
                escape(root),
                escape(storage_name),
                escape(&alias),
                escape(reference_field)
            ),
        );
    }

    fn join_one_to_many(
        root: &str,
        property: &str,
        local_field: &str,
        reference_field: &str,
        referenced: &EntityDefinition,
        query: &mut dyn QueryBuilder,
    ) {
        let alias = format!("{root}.{property}");
        if query.has_state(&alias) {
            return;
        }
        query.add_state(&alias);

        trace!(alias = %alias, table = %referenced.name, "join one-to-many");
        query.left_join(
            &escape(root),
            &escape(&referenced.name),
            &escape(&alias),
            &format!(
                "{}.{} = {}.{}",
                escape(root),
                escape(local_field),
                escape(&alias),
                escape(reference_field)
            ),
        );
    }

    fn join_many_to_many(
        root: &str,
        property: &str,
        mapping_local_column: &str,
        mapping_reference_column: &str,
        bridge: &EntityDefinition,
        referenced: &EntityDefinition,
        query: &mut dyn QueryBuilder,
    ) {
        let alias = format!("{root}.{property}");
        if query.has_state(&alias) {
            return;
        }
        let mapping_alias = format!("{root}.{property}.mapping");
        query.add_state(&alias);
        query.add_state(&mapping_alias);

        trace!(alias = %alias, bridge = %bridge.name, table = %referenced.name, "join many-to-many");
        query.left_join(
            &escape(root),
            &escape(&bridge.name),
            &escape(&mapping_alias),
            &format!(
                "{}.{} = {}.{}",
                escape(root),
                escape("id"),
                escape(&mapping_alias),
                escape(mapping_local_column)
            ),
        );
        query.left_join(
            &escape(&mapping_alias),
            &escape(&referenced.name),
            &escape(&alias),
            &format!(
                "{}.{} = {}.{}",
                escape(&mapping_alias),
                escape(mapping_reference_column),
                escape(&alias),
                escape("id")
            ),
        );
    }

    /// Join the `<entity>_translation` satellite for `root`, binding
    /// the context's primary locale under `:localeId`. With a fallback
    /// locale configured, a second copy of the table is joined as
    /// `root.translation.fallback` under `:fallbackLocaleId`; select
    /// expansion picks between the two via COALESCE.
    pub fn join_translation(
        root: &str,
        definition: &EntityDefinition,
        query: &mut dyn QueryBuilder,
        context: &TranslationContext,
    ) {
        let alias = format!("{root}.translation");
        if query.has_state(&alias) {
            return;
        }
        query.add_state(&alias);

        let table = definition.translation_table();
        let entity_id_column = format!("{}_id", definition.name);

        trace!(alias = %alias, table = %table, "join translation");
        query.bind(LOCALE_PARAM, ParamValue::Uuid(context.locale_id));
        query.left_join(
            &escape(root),
            &escape(&table),
            &escape(&alias),
            &format!(
                "{}.{} = {}.{} AND {}.{} = :{}",
                escape(&alias),
                escape(&entity_id_column),
                escape(root),
                escape("id"),
                escape(&alias),
                escape("locale_id"),
                LOCALE_PARAM
            ),
        );

        let Some(fallback_locale_id) = context.fallback_locale_id else {
            return;
        };

        let fallback_alias = format!("{root}.translation.fallback");
        query.left_join(
            &escape(root),
            &escape(&table),
            &escape(&fallback_alias),
            &format!(
                "{}.{} = {}.{} AND {}.{} = :{}",
                escape(&fallback_alias),
                escape(&entity_id_column),
                escape(root),
                escape("id"),
                escape(&fallback_alias),
                escape("locale_id"),
                FALLBACK_LOCALE_PARAM
            ),
        );
        query.bind(FALLBACK_LOCALE_PARAM, ParamValue::Uuid(fallback_locale_id));
    }
}
