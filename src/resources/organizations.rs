//! Brokers, broker memberships, customers.

use super::{
    AttrKind, Column, Field, Filter, Input, InputKind, ResourceSpec, Source, Target, Verb,
};

pub static BROKERS: ResourceSpec = ResourceSpec {
    name: "brokers",
    aliases: &["branches", "broker"],
    singular: "broker",
    plural: "brokers",
    about: "Broker organizations (branches)",
    path: "/v1/brokers",
    verbs: Verb::ALL,
    default_sort: Some("company-name"),
    include: &[],
    fieldsets: &[(
        "brokers",
        "company-name,abbreviation,is-active,is-transport-only,default-trucker-payment-terms,default-customer-payment-terms,default-reply-to-email,active-equipment-rental-notification-days",
    )],
    filters: &[
        Filter::same("company-name", "Filter by company name"),
        Filter::same("is-active", "Filter by active status (true/false)"),
        Filter::same("is-default", "Filter by default broker (true/false)"),
        Filter::same("sub-domain", "Filter by sub-domain"),
        Filter::same("trailer-classification", "Filter by trailer classification ID"),
        Filter::same("quickbooks-enabled", "Filter by QuickBooks enablement (true/false)"),
    ],
    fields: &[
        Field::new("id", Source::Id),
        Field::text("company_name", "company-name"),
        Field::text("abbreviation", "abbreviation").optional(),
        Field::attr("is_active", "is-active", AttrKind::Bool),
        Field::attr("is_transport_only", "is-transport-only", AttrKind::Bool),
        Field::attr("default_trucker_payment_terms", "default-trucker-payment-terms", AttrKind::Integer).optional(),
        Field::attr("default_customer_payment_terms", "default-customer-payment-terms", AttrKind::Integer).optional(),
        Field::text("default_reply_to_email", "default-reply-to-email").optional(),
        Field::attr(
            "active_equipment_rental_notification_days",
            "active-equipment-rental-notification-days",
            AttrKind::Raw,
        )
        .optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("COMPANY", &["company_name"]).max(80),
    ],
    inputs: &[
        Input::new("name", Target::Attr("company-name", InputKind::Text), "Company name").required(),
        Input::text("abbreviation", "Short abbreviation"),
        Input::attr("default-trucker-payment-terms", InputKind::Integer, "Default trucker payment terms (days)"),
        Input::attr("default-customer-payment-terms", InputKind::Integer, "Default customer payment terms (days)"),
        Input::attr("is-transport-only", InputKind::Bool, "Transport only (true/false)"),
        Input::text("default-reply-to-email", "Default reply-to email address"),
        Input::attr("is-active", InputKind::Bool, "Active status (true/false, admin only)"),
        Input::text("remit-to-address", "Remit-to address"),
        Input::text("help-text", "Help text"),
        Input::attr("quickbooks-enabled", InputKind::Bool, "QuickBooks enabled (true/false)"),
        Input::attr(
            "active-equipment-rental-notification-days",
            InputKind::Json,
            "Active equipment rental notification days (JSON array, e.g. \"[1,2,3]\")",
        ),
        Input::to_one("default-financial-contact", "users", "Default financial contact user ID"),
        Input::to_one("default-operations-contact", "users", "Default operations contact user ID"),
        Input::to_one("default-dispatch-contact", "users", "Default dispatch contact user ID"),
    ],
};

/// `organization` stands in only when `broker` has no id.
const BROKER_RELS: &[(&str, &[&str])] = &[
    ("broker", &["company-name"]),
    ("organization", &["company-name", "name"]),
];

pub static BROKER_MEMBERSHIPS: ResourceSpec = ResourceSpec {
    name: "broker-memberships",
    aliases: &["broker-membership"],
    singular: "broker membership",
    plural: "broker memberships",
    about: "Users belonging to a broker organization",
    path: "/v1/broker-memberships",
    verbs: Verb::READ,
    default_sort: None,
    include: &["user", "organization", "broker"],
    fieldsets: &[
        ("users", "name,email-address,mobile-number"),
        ("brokers", "company-name"),
    ],
    filters: &[
        Filter::same("broker", "Filter by broker ID"),
        Filter::same("organization", "Filter by organization (Broker|ID)"),
        Filter::value("project-office", "project_office", "Filter by project office ID"),
        Filter::same("user", "Filter by user ID"),
        Filter::same("kind", "Filter by role (operations/manager)"),
        Filter::same("q", "Search by user name"),
        Filter::value("drives-shift-type", "drives_shift_type", "Filter by shift type (any/day/night)"),
        Filter::value("external-employee-id", "external_employee_id", "Filter by external employee ID"),
        Filter::value("is-rate-editor", "is_rate_editor", "Filter by rate editor status (true/false)"),
        Filter::value("is-time-card-auditor", "is_time_card_auditor", "Filter by time card auditor status (true/false)"),
    ],
    fields: &[
        Field::new("id", Source::Id),
        Field::rel_id("user_id", "user"),
        Field::joined("user_name", "user", &["name"]),
        Field::joined("user_email", "user", &["email-address"]).optional(),
        Field::joined("user_mobile", "user", &["mobile-number"]).optional(),
        Field::new(
            "broker_id",
            Source::FallbackRel {
                rels: BROKER_RELS,
                label: false,
            },
        ),
        Field::new(
            "broker_name",
            Source::FallbackRel {
                rels: BROKER_RELS,
                label: true,
            },
        ),
        Field::text("kind", "kind"),
        Field::attr("is_admin", "is-admin", AttrKind::Bool),
        Field::text("title", "title").optional(),
        Field::text("external_employee_id", "external-employee-id").optional(),
        Field::text("color_hex", "color-hex").optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("USER", &["user_name", "user_id"]).max(20),
        Column::new("BROKER", &["broker_name", "broker_id"]).max(25),
        Column::new("KIND", &["kind"]),
    ],
    inputs: &[],
};

pub static CUSTOMERS: ResourceSpec = ResourceSpec {
    name: "customers",
    aliases: &["customer"],
    singular: "customer",
    plural: "customers",
    about: "Customer organizations served by a broker",
    path: "/v1/customers",
    verbs: Verb::ALL,
    default_sort: Some("company-name"),
    include: &["broker"],
    fieldsets: &[
        (
            "customers",
            "company-name,is-active,phone-number,company-address,default-payment-terms,credit-limit,notes,broker",
        ),
        ("brokers", "company-name"),
    ],
    filters: &[
        Filter::same("broker", "Filter by broker ID"),
        Filter::same("company-name", "Filter by company name"),
        Filter::same("is-active", "Filter by active status (true/false)"),
        Filter::same("q", "Search by name"),
    ],
    fields: &[
        Field::new("id", Source::Id),
        Field::text("company_name", "company-name"),
        Field::attr("is_active", "is-active", AttrKind::Bool),
        Field::rel_id("broker_id", "broker"),
        Field::joined("broker_name", "broker", &["company-name"]),
        Field::text("phone_number", "phone-number").optional(),
        Field::text("company_address", "company-address").optional(),
        Field::attr("default_payment_terms", "default-payment-terms", AttrKind::Integer).optional(),
        Field::attr("credit_limit", "credit-limit", AttrKind::Decimal).optional(),
        Field::text("notes", "notes").optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("COMPANY", &["company_name"]).max(40),
        Column::new("ACTIVE", &["is_active"]),
        Column::new("BROKER", &["broker_name", "broker_id"]).max(25),
    ],
    inputs: &[
        Input::new("name", Target::Attr("company-name", InputKind::Text), "Company name").required(),
        Input::to_one("broker", "brokers", "Broker ID").required(),
        Input::text("phone-number", "Phone number"),
        Input::text("company-address", "Company address"),
        Input::text("bill-to-address", "Bill-to address"),
        Input::text("notes", "Notes"),
        Input::attr("is-active", InputKind::Bool, "Active status (true/false)"),
        Input::attr("requires-union-drivers", InputKind::Bool, "Requires union drivers (true/false)"),
        Input::attr("default-payment-terms", InputKind::Integer, "Default payment terms"),
        Input::attr("credit-limit", InputKind::Number, "Credit limit"),
        Input::to_one("developer", "developers", "Developer ID"),
        Input::to_one("default-operations-contact", "users", "Default operations contact user ID"),
        Input::to_one("default-financial-contact", "users", "Default financial contact user ID"),
    ],
};
