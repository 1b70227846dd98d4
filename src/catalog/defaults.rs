use crate::catalog::FilterCatalog;
use crate::models::{AccessMode, FilterDefinition, FilterKind, ItemCategory};

/// Catalog used when no `catalog_path` is configured
pub fn default_catalog() -> FilterCatalog {
    use FilterKind::*;
    use ItemCategory as C;

    let definitions = vec![
        // Category-agnostic
        FilterDefinition::new("CreationDate", C::All, Date, "Date")
            .sortable()
            .with_description("Date the item was created"),
        FilterDefinition::new("Title", C::All, Text, "Text").sortable(),
        FilterDefinition::new("Owner", C::All, Reference, "Users")
            .with_description("User owning the item"),
        FilterDefinition::new("AccessMode", C::All, Enum, AccessMode::VALUE_KIND)
            .with_description("Visibility of the item"),
        FilterDefinition::new("Tags", C::All, Enum, "Tags"),
        FilterDefinition::new("ItemId", C::All, Reference, "Items").hidden(),
        // Annotations
        FilterDefinition::new(
            "InteractionPartner",
            C::Annotation,
            Reference,
            "InteractionPartners",
        )
        .with_aliases(&["InteractionPartnerOne", "InteractionPartnerTwo"])
        .with_related(&["InteractionType"])
        .with_description("Either partner of a recorded interaction"),
        FilterDefinition::new("InteractionType", C::Annotation, Enum, "InteractionTypes")
            .with_related(&["InteractionPartner"]),
        FilterDefinition::new("Species", C::Annotation, Enum, "Species"),
        FilterDefinition::new("HasAttachments", C::Annotation, Boolean, "Boolean"),
        // Files
        FilterDefinition::new("FileType", C::File, Enum, "FileTypes"),
        FilterDefinition::new("FileSize", C::File, Range, "Bytes").sortable(),
        FilterDefinition::new("StoragePath", C::File, Text, "Text").hidden(),
        // Collections
        FilterDefinition::new("ItemCount", C::Collection, Range, "Count").sortable(),
        // Groups
        FilterDefinition::new("MemberCount", C::Group, Range, "Count").sortable(),
        FilterDefinition::new("Member", C::Group, Reference, "Users"),
        // Users
        FilterDefinition::new("Role", C::User, Enum, "Roles"),
    ];

    match FilterCatalog::from_definitions(definitions) {
        Ok(catalog) => catalog,
        Err(err) => unreachable!("built-in filter catalog is invalid: {err}"),
    }
}
