use crate::{
    query::{JoinBuilder, QueryBuilder, TranslationContext, escape},
    schema::{EntityDefinition, FieldCollection},
};

/// Expands the translated fields of an entity into projection
/// expressions, COALESCE-ing primary and fallback locale when a
/// fallback is configured.
pub struct TranslationSelector;

impl TranslationSelector {
    /// Add one select expression per translated field in `fields`,
    /// aliased `root.translation.<property>`.
    ///
    /// Ensures the translation join first; the join is idempotent, so
    /// this is safe to call unconditionally. Non-translated fields in
    /// `fields` are skipped, so an entity's full collection can be
    /// passed as-is.
    ///
    /// With a fallback configured the primary locale still wins
    /// whenever its column is non-null; the fallback only fills in when
    /// the primary row is absent or stores null (COALESCE semantics).
    pub fn add_translation_selects(
        root: &str,
        definition: &EntityDefinition,
        query: &mut dyn QueryBuilder,
        context: &TranslationContext,
        fields: &FieldCollection,
    ) {
        JoinBuilder::join_translation(root, definition, query, context);

        let alias = format!("{root}.translation");

        if !context.has_fallback() {
            for (property, storage_name) in fields.translated() {
                query.add_select(&format!(
                    "{}.{} as {}",
                    escape(&alias),
                    escape(storage_name),
                    escape(&format!("{alias}.{property}"))
                ));
            }
            return;
        }

        let fallback = format!("{root}.translation.fallback");
        for (property, storage_name) in fields.translated() {
            query.add_select(&format!(
                "COALESCE({}.{}, {}.{}) as {}",
                escape(&alias),
                escape(storage_name),
                escape(&fallback),
                escape(storage_name),
                escape(&format!("{alias}.{property}"))
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::{
        query::SqlQuery,
        schema::{Field, SchemaRegistry},
    };

    fn category() -> EntityDefinition {
        EntityDefinition::new(
            "category",
            FieldCollection::new()
                .with("active", Field::Storage { storage_name: "active".into() })
                .with("name", Field::Translated { storage_name: "name".into() })
                .with("description", Field::Translated { storage_name: "description_long".into() }),
        )
    }

    #[test]
    fn plain_selects_without_a_fallback() {
        let definition = category();
        let mut query = SqlQuery::new();
        let context = TranslationContext::new(Uuid::new_v4());

        TranslationSelector::add_translation_selects(
            "category",
            &definition,
            &mut query,
            &context,
            &definition.fields,
        );

        assert_eq!(query.joins.len(), 1);
        assert_eq!(query.selects, vec![
            "`category.translation`.`name` as `category.translation.name`",
            "`category.translation`.`description_long` as `category.translation.description`",
        ]);
    }

    #[test]
    fn coalesce_selects_with_a_fallback() {
        let definition = category();
        let mut query = SqlQuery::new();
        let context = TranslationContext::with_fallback(Uuid::new_v4(), Uuid::new_v4());

        TranslationSelector::add_translation_selects(
            "category",
            &definition,
            &mut query,
            &context,
            &definition.fields,
        );

        assert_eq!(query.joins.len(), 2);
        assert_eq!(query.selects[0],
            "COALESCE(`category.translation`.`name`, `category.translation.fallback`.`name`) as `category.translation.name`"
        );
        assert_eq!(query.selects[1],
            "COALESCE(`category.translation`.`description_long`, `category.translation.fallback`.`description_long`) as `category.translation.description`"
        );
    }

    #[test]
    fn reuses_an_existing_translation_join() {
        let registry = {
            let mut registry = SchemaRegistry::new();
            registry.define(category()).unwrap();
            registry
        };
        let definition = registry.get("category").unwrap();
        let mut query = SqlQuery::new();
        let context = TranslationContext::new(Uuid::new_v4());

        JoinBuilder::join_field("name", definition, "category", &mut query, &registry, &context).unwrap();
        TranslationSelector::add_translation_selects(
            "category",
            definition,
            &mut query,
            &context,
            &definition.fields,
        );

        assert_eq!(query.joins.len(), 1);
        assert_eq!(query.selects.len(), 2);
    }

    #[test]
    fn non_translated_fields_are_skipped() {
        let definition = category();
        let mut query = SqlQuery::new();
        let context = TranslationContext::new(Uuid::new_v4());

        TranslationSelector::add_translation_selects(
            "category",
            &definition,
            &mut query,
            &context,
            &definition.fields,
        );

        assert!(query.selects.iter().all(|select| !select.contains("`active`")));
    }
}
