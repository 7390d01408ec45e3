//! Tenders (polymorphic view) and customer tenders.

use super::{AttrKind, Column, Field, Filter, Input, InputKind, RefStyle, ResourceSpec, Source, Target, Verb};

const COMPANY_LABEL: &[&str] = &["company-name", "name"];

const TENDER_FILTERS: &[Filter] = &[
    Filter::same("buyer", "Filter by buyer (Type|ID)"),
    Filter::same("seller", "Filter by seller (Type|ID)"),
    Filter::same("broker", "Filter by broker ID"),
    Filter::same("job", "Filter by job ID"),
    Filter::same("status", "Filter by status"),
    Filter::same("start-at-min", "Filter by minimum shift start (ISO 8601)"),
    Filter::same("start-at-max", "Filter by maximum shift start (ISO 8601)"),
    Filter::same("job-site", "Filter by job site ID"),
    Filter::same("job-number", "Filter by job number"),
    Filter::same("created-at-min", "Filter by minimum creation time"),
    Filter::same("created-at-max", "Filter by maximum creation time"),
];

pub static TENDERS: ResourceSpec = ResourceSpec {
    name: "tenders",
    aliases: &["tender"],
    singular: "tender",
    plural: "tenders",
    about: "All tenders regardless of buyer / seller kind",
    path: "/v1/tenders",
    verbs: Verb::READ,
    default_sort: None,
    include: &["job", "buyer", "seller"],
    fieldsets: &[
        ("tenders", "polymorphic-type,status,expires-at,job,buyer,seller"),
        ("jobs", "external-job-number"),
        ("brokers", "company-name"),
        ("customers", "company-name"),
        ("truckers", "company-name"),
    ],
    filters: TENDER_FILTERS,
    fields: &[
        Field::new("id", Source::Id),
        Field::text("type", "polymorphic-type").optional(),
        Field::text("status", "status").optional(),
        Field::rel_id("job_id", "job").optional(),
        Field::joined("job_number", "job", &["external-job-number"]).optional(),
        Field::rel_id("buyer_id", "buyer").optional(),
        Field::new("buyer_type", Source::RelType("buyer")).optional(),
        Field::joined("buyer", "buyer", COMPANY_LABEL).optional(),
        Field::new("buyer_ref", Source::RelRef("buyer", RefStyle::Pipe)).optional(),
        Field::rel_id("seller_id", "seller").optional(),
        Field::new("seller_type", Source::RelType("seller")).optional(),
        Field::joined("seller", "seller", COMPANY_LABEL).optional(),
        Field::new("seller_ref", Source::RelRef("seller", RefStyle::Pipe)).optional(),
        Field::attr("expires_at", "expires-at", AttrKind::DateTime).optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("TYPE", &["type"]).max(22),
        Column::new("STATUS", &["status"]),
        Column::new("JOB", &["job_number", "job_id"]).max(20),
        Column::new("BUYER", &["buyer", "buyer_ref"]).max(25),
        Column::new("SELLER", &["seller", "seller_ref"]).max(25),
        Column::new("EXPIRES", &["expires_at"]),
    ],
    inputs: &[],
};

pub static CUSTOMER_TENDERS: ResourceSpec = ResourceSpec {
    name: "customer-tenders",
    aliases: &["customer-tender"],
    singular: "customer tender",
    plural: "customer tenders",
    about: "Tenders from a customer (buyer) to a broker (seller)",
    path: "/v1/customer-tenders",
    verbs: Verb::ALL,
    default_sort: None,
    include: &["job", "buyer", "seller"],
    fieldsets: &[
        (
            "customer-tenders",
            "status,expires-at,note,payment-terms,job,buyer,seller,certification-requirements",
        ),
        ("jobs", "job-number,job-name"),
        ("customers", "company-name,name"),
        ("brokers", "company-name,name"),
    ],
    filters: TENDER_FILTERS,
    fields: &[
        Field::new("id", Source::Id),
        Field::text("status", "status").optional(),
        Field::rel_id("job_id", "job").optional(),
        Field::joined("job_number", "job", &["job-number", "job-name"]).optional(),
        Field::rel_id("customer_id", "buyer").optional(),
        Field::joined("customer", "buyer", COMPANY_LABEL).optional(),
        Field::rel_id("broker_id", "seller").optional(),
        Field::joined("broker", "seller", COMPANY_LABEL).optional(),
        Field::attr("expires_at", "expires-at", AttrKind::DateTime).optional(),
        Field::text("note", "note").optional(),
        Field::attr("payment_terms", "payment-terms", AttrKind::Integer).optional(),
        Field::new("certification_requirement_ids", Source::RelIds("certification-requirements")).optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("STATUS", &["status"]),
        Column::new("JOB", &["job_number", "job_id"]).max(20),
        Column::new("CUSTOMER", &["customer", "customer_id"]).max(25),
        Column::new("BROKER", &["broker", "broker_id"]).max(25),
        Column::new("EXPIRES", &["expires_at"]),
    ],
    inputs: &[
        Input::to_one("job", "jobs", "Job ID").required(),
        Input::new("customer", Target::ToOne { rel: "buyer", kind: "customers" }, "Customer ID (buyer)").required(),
        Input::new("broker", Target::ToOne { rel: "seller", kind: "brokers" }, "Broker ID (seller)").required(),
        Input::text("expires-at", "Expiration time (RFC3339)"),
        Input::text("note", "Note for the tender"),
        Input::attr("is-trucker-shift-rejection-permitted", InputKind::Bool, "Allow trucker shift rejection (true/false)"),
        Input::attr("payment-terms", InputKind::Integer, "Payment terms (days)"),
        Input::text("payment-terms-and-conditions", "Payment terms and conditions"),
        Input::attr("restrict-to-customer-truckers", InputKind::Bool, "Restrict to customer truckers (true/false)"),
        Input::attr("maximum-travel-minutes", InputKind::Number, "Maximum travel minutes"),
        Input::attr("displays-trips", InputKind::Bool, "Display trips (true/false)"),
        Input::to_one("seller-financial-contact", "users", "Seller financial contact user ID"),
        Input::to_one("seller-operations-contact", "users", "Seller operations contact user ID"),
        Input::to_one("buyer-operations-contact", "users", "Buyer operations contact user ID"),
        Input::to_one("buyer-financial-contact", "users", "Buyer financial contact user ID"),
        Input::to_many("certification-requirements", "certification-requirements", "Certification requirement IDs (comma-separated)"),
    ],
};
