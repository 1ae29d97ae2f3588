//! Entity graphs and row sets shared by the hydration tests.

use crate::row::Row;
use rowgraph_schema::{
    build::build_entity_graphs,
    decl::{
        AssociationDeclaration, AttributeOverride, EmbeddableTypeDeclaration, EmbeddedDeclaration,
        EntityDeclaration, IdDeclaration, PropertyDeclaration, SchemaDeclarations,
    },
    node::EntityGraphs,
    types::Type,
};
use serde_json::Value as Json;

pub fn ty(qualified: &str) -> Type {
    Type::parse(qualified)
}

/// Rows from a JSON array of `{"table.column": value}` objects.
pub fn rows(json: Json) -> Vec<Row> {
    serde_json::from_value(json).expect("rows should deserialize")
}

fn graphs(decls: &SchemaDeclarations) -> EntityGraphs {
    build_entity_graphs(decls).expect("fixture declarations should build")
}

fn int_id() -> IdDeclaration {
    IdDeclaration::single(PropertyDeclaration::new("id", "core.Int64")).generated()
}

fn text_id() -> IdDeclaration {
    IdDeclaration::single(PropertyDeclaration::new("id", "core.Text"))
}

/// `Customer` one-to-many `Phone` with no declared inverse.
///
/// Tables `customer(id, name)` and `phone(id, number, customer_id)`.
pub fn shop() -> EntityGraphs {
    graphs(
        &SchemaDeclarations::new()
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
            ),
    )
}

/// Self-referential `Category`, table `category(id, name, parent_id)`.
pub fn category() -> EntityGraphs {
    graphs(
        &SchemaDeclarations::new().entity(
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
        ),
    )
}

/// `Student` many-to-many `Course` through `student_courses(student_id, course_id)`.
pub fn school() -> EntityGraphs {
    graphs(
        &SchemaDeclarations::new()
            .entity(
                EntityDeclaration::new("school.Student")
                    .id(text_id())
                    .property(PropertyDeclaration::new("name", "core.Text"))
                    .association(AssociationDeclaration::many_to_many(
                        "courses",
                        "school.Course",
                    )),
            )
            .entity(
                EntityDeclaration::new("school.Course")
                    .id(text_id())
                    .property(PropertyDeclaration::new("title", "core.Text"))
                    .association(
                        AssociationDeclaration::many_to_many("students", "school.Student")
                            .mapped_by("courses"),
                    ),
            ),
    )
}

/// `Record` keyed by `RecordId(id, type)`, table
/// `record(id, record_type, note, address_street, city)`.
pub fn audit() -> EntityGraphs {
    graphs(
        &SchemaDeclarations::new()
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
            .entity(
                EntityDeclaration::new("audit.Record")
                    .id(IdDeclaration::Embedded {
                        name: "id".into(),
                        embeddable: Type::parse("audit.RecordId"),
                        nullable: false,
                        generated: false,
                        overrides: vec![AttributeOverride::new("type", "record_type")],
                    })
                    .property(PropertyDeclaration::new("note", "core.Text").nullable())
                    .embedded(
                        EmbeddedDeclaration::new("address", "audit.Address")
                            .nullable()
                            .with_override("street", "address_street"),
                    ),
            ),
    )
}

/// `Employee` one-to-one `Passport`, the passport keyed by its owner's id.
///
/// Tables `employee(id, name)` and `passport(employee_id, number)`.
pub fn hr() -> EntityGraphs {
    graphs(
        &SchemaDeclarations::new()
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
            ),
    )
}

/// `Author` and `Book` referencing each other, `Book` also referencing an
/// optional `Publisher`.
///
/// Tables `author(id, name)`, `book(id, title, author_id, publisher_id)` and
/// `publisher(id, name)`.
pub fn library() -> EntityGraphs {
    graphs(
        &SchemaDeclarations::new()
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
                    .association(AssociationDeclaration::many_to_one(
                        "author",
                        "library.Author",
                    ))
                    .association(
                        AssociationDeclaration::many_to_one("publisher", "library.Publisher")
                            .nullable(),
                    ),
            )
            .entity(
                EntityDeclaration::new("library.Publisher")
                    .id(int_id())
                    .property(PropertyDeclaration::new("name", "core.Text")),
            ),
    )
}
