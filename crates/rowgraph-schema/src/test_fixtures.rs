//! Declaration sets shared by the unit tests.

use crate::{
    decl::{
        AssociationDeclaration, AttributeOverride, ConverterDeclaration,
        EmbeddableTypeDeclaration, EmbeddedDeclaration, EntityDeclaration, IdDeclaration,
        PropertyDeclaration, SchemaDeclarations,
    },
    types::{EnumEncoding, Type},
};

fn int_id() -> IdDeclaration {
    IdDeclaration::single(PropertyDeclaration::new("id", "core.Int64")).generated()
}

/// `Customer` one-to-many `Phone`, no declared inverse.
pub fn shop() -> SchemaDeclarations {
    SchemaDeclarations::new()
        .entity(
            EntityDeclaration::new("shop.Customer")
                .id(int_id())
                .property(PropertyDeclaration::new("name", "core.Text"))
                .association(AssociationDeclaration::one_to_many("phones", "shop.Phone")),
        )
        .entity(
            EntityDeclaration::new("shop.Phone")
                .id(int_id())
                .property(PropertyDeclaration::new("number", "core.Text")),
        )
}

/// Self-referential `Category` with a parent and its children.
pub fn category() -> SchemaDeclarations {
    SchemaDeclarations::new().entity(
        EntityDeclaration::new("shop.Category")
            .id(int_id())
            .property(PropertyDeclaration::new("name", "core.Text").nullable())
            .association(
                AssociationDeclaration::many_to_one("parent", "shop.Category")
                    .join_column("parent_id")
                    .nullable(),
            )
            .association(
                AssociationDeclaration::one_to_many("children", "shop.Category")
                    .mapped_by("parent"),
            ),
    )
}

/// `Student` many-to-many `Course`, with an inverse side on `Course`.
pub fn school() -> SchemaDeclarations {
    SchemaDeclarations::new()
        .entity(
            EntityDeclaration::new("school.Student")
                .id(IdDeclaration::single(PropertyDeclaration::new("id", "core.Text")))
                .property(PropertyDeclaration::new("name", "core.Text"))
                .association(AssociationDeclaration::many_to_many("courses", "school.Course")),
        )
        .entity(
            EntityDeclaration::new("school.Course")
                .id(IdDeclaration::single(PropertyDeclaration::new("id", "core.Text")))
                .property(PropertyDeclaration::new("title", "core.Text"))
                .association(
                    AssociationDeclaration::many_to_many("students", "school.Student")
                        .mapped_by("courses"),
                ),
        )
}

/// `Record` keyed by the composite `RecordId`, plus an embedded `Address`.
pub fn audit() -> SchemaDeclarations {
    SchemaDeclarations::new()
        .embeddable_type(EmbeddableTypeDeclaration::new(
            "audit.RecordId",
            vec![
                PropertyDeclaration::new("id", "core.Text"),
                PropertyDeclaration::new("type", "core.Text"),
            ],
        ))
        .embeddable_type(EmbeddableTypeDeclaration::new(
            "audit.Address",
            vec![
                PropertyDeclaration::new("street", "core.Text"),
                PropertyDeclaration::new("city", "core.Text"),
            ],
        ))
        .converter(ConverterDeclaration::new("audit.JsonConverter", "core.Text"))
        .entity(
            EntityDeclaration::new("audit.Record")
                .id(IdDeclaration::Embedded {
                    name: "id".into(),
                    embeddable: Type::parse("audit.RecordId"),
                    nullable: false,
                    generated: false,
                    overrides: vec![AttributeOverride::new("type", "record_type")],
                })
                .property(
                    PropertyDeclaration::new("payload", "audit.Payload")
                        .converter("audit.JsonConverter"),
                )
                .property(
                    PropertyDeclaration::new("level", "audit.Level")
                        .enumerated(EnumEncoding::Ordinal),
                )
                .embedded(
                    EmbeddedDeclaration::new("address", "audit.Address")
                        .with_override("street", "address_street"),
                ),
        )
}

/// `Passport` keyed by its owner's id (shared primary key).
pub fn hr() -> SchemaDeclarations {
    SchemaDeclarations::new()
        .entity(
            EntityDeclaration::new("hr.Employee")
                .id(int_id())
                .property(PropertyDeclaration::new("name", "core.Text"))
                .association(
                    AssociationDeclaration::one_to_one("passport", "hr.Passport")
                        .mapped_by("employee")
                        .nullable(),
                ),
        )
        .entity(
            EntityDeclaration::new("hr.Passport")
                .id(IdDeclaration::single(
                    PropertyDeclaration::new("employeeId", "core.Int64").column("employee_id"),
                ))
                .property(PropertyDeclaration::new("number", "core.Text"))
                .association(
                    AssociationDeclaration::one_to_one("employee", "hr.Employee")
                        .join_column("employee_id"),
                ),
        )
}

/// `Author` and `Book` referencing each other, `Book` also references
/// `Publisher`.
pub fn library() -> SchemaDeclarations {
    SchemaDeclarations::new()
        .entity(
            EntityDeclaration::new("library.Author")
                .id(int_id())
                .property(PropertyDeclaration::new("name", "core.Text"))
                .association(
                    AssociationDeclaration::one_to_many("books", "library.Book")
                        .mapped_by("author"),
                ),
        )
        .entity(
            EntityDeclaration::new("library.Book")
                .id(int_id())
                .property(PropertyDeclaration::new("title", "core.Text"))
                .association(AssociationDeclaration::many_to_one("author", "library.Author"))
                .association(
                    AssociationDeclaration::many_to_one("publisher", "library.Publisher")
                        .nullable(),
                ),
        )
        .entity(
            EntityDeclaration::new("library.Publisher")
                .id(int_id())
                .property(PropertyDeclaration::new("name", "core.Text")),
        )
}
