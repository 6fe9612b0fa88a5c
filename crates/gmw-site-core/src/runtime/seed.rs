// crates/gmw-site-core/src/runtime/seed.rs
// ============================================================================
// Module: GMW Site Sample Content
// Description: Fixed sample blog posts and homepage metrics.
// Purpose: Populate a fresh store with demonstration content.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Seeding inserts five published blog posts and six active homepage metrics.
//! It is deliberately non-idempotent: every run inserts a fresh copy, so two
//! runs leave twice the rows of one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::CreateBlogPostInput;
use crate::core::CreateCompanyStatsInput;
use crate::core::Timestamp;
use crate::interfaces::SiteStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Sample Blog Posts
// ============================================================================

/// Author credited on sample posts.
const SAMPLE_AUTHOR: &str = "GMW Tech Group Editorial Team";

/// Builds one published sample post.
fn sample_post(
    title: &str,
    slug: &str,
    excerpt: &str,
    content: &str,
    category: &str,
    tags: &str,
    featured_image: &str,
) -> CreateBlogPostInput {
    CreateBlogPostInput {
        title: title.to_string(),
        slug: slug.to_string(),
        excerpt: Some(excerpt.to_string()),
        content: content.to_string(),
        author: SAMPLE_AUTHOR.to_string(),
        category: category.to_string(),
        tags: Some(tags.to_string()),
        featured_image: Some(featured_image.to_string()),
        published: true,
    }
}

/// Returns the five sample blog posts, all published.
#[must_use]
pub fn sample_blog_posts() -> Vec<CreateBlogPostInput> {
    vec![
        sample_post(
            "AI-Powered ERP Solutions Transforming African Businesses",
            "ai-powered-erp-solutions-transforming-african-businesses",
            "How machine learning layered onto enterprise resource planning is giving \
             African manufacturers, distributors and retailers real-time operational insight.",
            "Enterprise resource planning has long been the backbone of large organisations, \
             but across Africa many mid-sized businesses have struggled with rigid systems that \
             were designed for other markets. A new generation of AI-powered ERP platforms is \
             changing that picture.\n\n\
             Demand forecasting models trained on local sales history now account for seasonal \
             harvests, school calendars and mobile-money payment cycles. Procurement teams receive \
             reorder suggestions before stock-outs occur, and finance teams see cash-flow \
             projections that update as invoices are paid.\n\n\
             Document intelligence removes much of the manual data entry that slowed adoption. \
             Supplier invoices, delivery notes and customs forms are read automatically, matched \
             against purchase orders and flagged only when something looks wrong.\n\n\
             Our engagements in Nairobi, Kampala and Dar es Salaam show a consistent pattern: \
             businesses that pair a modern ERP core with targeted machine learning cut \
             month-end closing time by more than half and reduce inventory holding costs by \
             between fifteen and twenty-five percent.\n\n\
             The lesson is that AI does not replace the ERP. It makes the data already captured \
             by the ERP useful at the moment a decision is made, which is where the real return \
             on investment lies.",
            "AI/ML",
            r#"["AI","ERP","Machine Learning","Digital Transformation"]"#,
            "https://images.gmwtechgroup.com/blog/ai-erp.jpg",
        ),
        sample_post(
            "Blockchain Revolution: Tokenizing Supply Chains in Kenya",
            "blockchain-revolution-tokenizing-supply-chains-kenya",
            "Tokenized provenance records are helping Kenyan tea, coffee and horticulture \
             exporters prove origin and get paid faster.",
            "Kenya's agricultural exports travel long and complex routes before they reach a \
             buyer's shelf. Every hand-off, from smallholder farm to cooperative, warehouse, \
             port and importer, has traditionally been recorded on paper or in disconnected \
             spreadsheets.\n\n\
             Tokenization gives each consignment a digital twin on a shared ledger. When a \
             cooperative weighs a delivery, the reading is signed and recorded. When the lot is \
             graded, blended or shipped, the token is updated rather than re-created, so the full \
             history stays attached to the goods.\n\n\
             Buyers in Europe and the Middle East increasingly ask for this kind of traceability \
             to satisfy sustainability and due-diligence rules. Exporters who can provide it \
             negotiate better prices and face fewer disputes at the destination port.\n\n\
             Smart contracts also shorten the payment cycle. Once a shipment's arrival is \
             confirmed on the ledger, release of funds can be triggered automatically, and \
             farmers receive their share through mobile money within days rather than months.\n\n\
             The technology is only part of the story. Successful pilots invest as much in \
             training cooperative staff and agreeing data standards with partners as they do \
             in the ledger itself.",
            "Blockchain",
            r#"["Blockchain","Supply Chain","Tokenization","Kenya"]"#,
            "https://images.gmwtechgroup.com/blog/blockchain-supply-chain.jpg",
        ),
        sample_post(
            "IoT Predictive Maintenance: Reducing Downtime by 40%",
            "iot-predictive-maintenance-reducing-downtime-40-percent",
            "Sensor networks and anomaly detection let plant operators fix equipment before it \
             fails, cutting unplanned downtime by as much as forty percent.",
            "Unplanned downtime is one of the most expensive problems a manufacturer can face. \
             A single failed compressor or conveyor motor can halt a production line for days \
             while parts are sourced and technicians are found.\n\n\
             Predictive maintenance turns that model around. Low-cost vibration, temperature \
             and current sensors are fitted to critical assets and stream readings to an edge \
             gateway. Models trained on each machine's normal behaviour flag subtle changes long \
             before a human operator would notice them.\n\n\
             In a recent deployment at a beverage bottling plant, the maintenance team received \
             an alert about bearing wear on a filler motor three weeks before it would have \
             seized. The part was replaced during a scheduled changeover and the line never \
             stopped.\n\n\
             Across the sites we support, clients have reduced unplanned downtime by roughly \
             forty percent in the first year, while spare-parts spending fell because components \
             are replaced when they need it rather than on a fixed calendar.\n\n\
             Connectivity is often the hardest constraint. Designs that buffer data at the edge \
             and synchronise when a link is available keep working even where networks are \
             intermittent.",
            "IoT",
            r#"["IoT","Predictive Maintenance","Manufacturing","Edge Computing"]"#,
            "https://images.gmwtechgroup.com/blog/iot-maintenance.jpg",
        ),
        sample_post(
            "GMW Tech Group Expands Operations Across East Africa",
            "gmw-tech-group-expands-operations-across-east-africa",
            "New delivery centres in Kampala, Kigali and Dar es Salaam bring our engineering \
             and advisory teams closer to clients across the region.",
            "GMW Tech Group is pleased to announce the opening of three new delivery centres in \
             Kampala, Kigali and Dar es Salaam, complementing our headquarters in Nairobi.\n\n\
             The expansion follows several years of strong demand from clients in manufacturing, \
             agriculture, financial services and logistics. Having engineers, data scientists \
             and project managers on the ground means shorter feedback loops, a better \
             understanding of local regulation and faster response when systems need \
             attention.\n\n\
             Each centre will offer the full range of our services, from AI and machine learning \
             to blockchain, IoT, data analytics, risk planning and growth strategy. Teams will \
             collaborate across borders so that clients benefit from experience gained \
             throughout the region.\n\n\
             We are also launching a graduate programme in partnership with local universities. \
             Over the next two years we plan to recruit and train more than one hundred young \
             technologists, growing the talent pool that the region's digital economy depends \
             on.\n\n\
             We thank our clients and partners for their trust and look forward to working with \
             them from our new offices.",
            "Company News",
            r#"["Company News","Expansion","East Africa"]"#,
            "https://images.gmwtechgroup.com/blog/east-africa-expansion.jpg",
        ),
        sample_post(
            "Digital Transformation Trends Shaping Africa's Future",
            "digital-transformation-trends-shaping-africas-future",
            "From mobile-first finance to data sovereignty, the trends that will define how \
             African organisations compete over the next decade.",
            "Africa's digital economy is growing faster than almost any other region, driven by \
             a young population, widespread mobile adoption and a wave of local innovation. \
             Several trends stand out for organisations planning their next steps.\n\n\
             Mobile-first everything. Customers expect to transact, apply and get support from \
             a phone. Back-office systems must expose clean interfaces so that mobile channels \
             are not bolted on as an afterthought.\n\n\
             Data as a strategic asset. Organisations are moving from collecting data for \
             compliance to using it for pricing, credit scoring, logistics planning and product \
             design. That shift requires investment in data quality and governance.\n\n\
             Cloud with local presence. New regional data centres and evolving data-protection \
             laws are changing where workloads run. Hybrid designs that keep sensitive data \
             in-country while using global cloud services elsewhere are becoming the norm.\n\n\
             Practical AI. The most successful AI projects solve narrow, well-defined problems \
             such as fraud detection, document processing or demand forecasting, and then \
             expand once they have proven their value.\n\n\
             Organisations that treat transformation as a continuous capability rather than a \
             one-off project will be best placed to benefit from these trends.",
            "Industry Insights",
            r#"["Digital Transformation","Africa","Trends","Cloud"]"#,
            "https://images.gmwtechgroup.com/blog/digital-trends.jpg",
        ),
    ]
}

// ============================================================================
// SECTION: Sample Company Statistics
// ============================================================================

/// Returns the six sample homepage metrics, active and ordered 1 through 6.
#[must_use]
pub fn sample_company_stats() -> Vec<CreateCompanyStatsInput> {
    [
        ("Projects Completed", "150+"),
        ("Happy Clients", "80+"),
        ("Countries Served", "12"),
        ("Years of Experience", "10+"),
        ("Team Members", "50+"),
        ("AI Models Deployed", "25+"),
    ]
    .into_iter()
    .zip(1_i64..)
    .map(|((metric_name, metric_value), display_order)| CreateCompanyStatsInput {
        metric_name: metric_name.to_string(),
        metric_value: metric_value.to_string(),
        display_order,
        active: true,
    })
    .collect()
}

// ============================================================================
// SECTION: Seeding
// ============================================================================

/// Counts of rows inserted by one seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    /// Blog posts inserted.
    pub blog_posts: usize,
    /// Company statistics inserted.
    pub company_stats: usize,
}

impl SeedSummary {
    /// Returns the caller-facing completion message.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Sample data seeded successfully: {} blog posts and {} company stats",
            self.blog_posts, self.company_stats
        )
    }
}

/// Inserts the sample blog posts and company statistics.
///
/// # Errors
///
/// Returns [`StoreError`] from the first failing insert; rows inserted before
/// the failure remain.
pub fn seed_sample_data(
    store: &(impl SiteStore + ?Sized),
    now: Timestamp,
) -> Result<SeedSummary, StoreError> {
    let mut summary = SeedSummary {
        blog_posts: 0,
        company_stats: 0,
    };
    for post in sample_blog_posts() {
        store.create_blog_post(&post, now)?;
        summary.blog_posts += 1;
    }
    for stat in sample_company_stats() {
        store.create_company_stats(&stat, now)?;
        summary.company_stats += 1;
    }
    Ok(summary)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
