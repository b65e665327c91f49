// core/src/seed.rs

//! The starter catalogue loaded into an empty store.

use crate::error::ShopResult;
use crate::models::Product;
use crate::repository::ProductRepository;
use tracing::{info, instrument};

// (name, description, stock, price in cents, image url)
const CATALOGUE: &[(&str, &str, i64, i64, &str)] = &[
    (
      "Fertilizer",
      "Premium quality fertilizer enriched with essential nutrients to promote healthy growth and maximize crop yield. Suitable for all types of crops and soil conditions.",
      100,
      2599,
      "https://m.media-amazon.com/images/I/713+fXLmLpL.jpg",
    ),
    (
      "Pesticide",
      "Effective pesticide formulated to control a wide range of pests and insects while ensuring the safety of crops. Provides long-lasting protection for optimal crop production.",
      80,
      1549,
      "https://c8.alamy.com/comp/PA28RB/orlando-floridaace-hardwarepesticides-insecticides-poisons-insect-spraysweed-killerroundupshelves-display-saleinterior-insidefl171029120-PA28RB.jpg",
    ),
    (
      "Seeds",
      "High-quality seeds sourced from trusted suppliers, selected for superior germination rates and disease resistance. Ideal for starting a successful crop planting season.",
      200,
      899,
      "https://northernseeds.ca/cdn/shop/files/seed_packets.jpg?v=1668690089",
    ),
    (
      "Irrigation System",
      "Advanced irrigation system designed to deliver precise and efficient watering for crops. Features customizable settings and durable construction for long-term use.",
      30,
      29999,
      "https://www.watercalculator.org/wp-content/uploads/2017/04/iStock_000010933844_1950.jpg",
    ),
    (
      "Tractor",
      "Powerful tractor equipped with cutting-edge technology for various farm operations. Offers unmatched performance, reliability, and versatility in agricultural tasks.",
      10,
      1500000,
      "https://www.profi.co.uk/wp-content/uploads/sites/8/2022/01/8a._jd_7r330_ap.jpg",
    ),
    (
      "Herbicide",
      "Herbicide specially formulated to control weeds effectively without harming crops or the environment. Provides targeted action for weed management in fields and gardens.",
      50,
      1875,
      "https://www.agriplexindia.com/cdn/shop/collections/Herbicides.png?crop=center&height=500&v=1673857391&width=600",
    ),
    (
      "Mulch",
      "Organic mulch made from natural materials to improve soil health and moisture retention. Helps suppress weeds, regulate soil temperature, and promote healthy plant growth.",
      120,
      599,
      "https://www.thespruce.com/thmb/GNryY_TSnuf_2aQ04mODi7yI58w=/4832x0/filters:no_upscale():max_bytes(150000):strip_icc()/SPR-is-dyed-mulch-safe-to-use-2131983-hero-0aef1a51041046e99d27a83b65c19f88.jpg",
    ),
    (
      "Fencing",
      "Durable fencing solution designed to protect crops and livestock from unwanted intruders. Constructed from high-quality materials for strength, durability, and longevity.",
      40,
      19999,
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQ-Qjgj92EQ30TwzCMCGN1fbCkBXTAySv80fA&usqp=CAU",
    ),
    (
      "Solar Panels",
      "Solar panels harnessing renewable energy from the sun to power farm operations. Provides clean, sustainable energy for reducing electricity costs and environmental impact.",
      15,
      99999,
      "https://cdn.britannica.com/91/222691-050-E8BDF226/installing-solar-panels.jpg",
    ),
    (
      "Greenhouse Kit",
      "Complete greenhouse kit for creating a controlled environment for optimal plant growth. Features include adjustable ventilation, sturdy frame, and UV-resistant covering.",
      5,
      499999,
      "https://growerssolution.com/cdn/shop/files/Untitleddesign-105_1200x.png?v=1698764945",
    ),
    (
      "Livestock Feed",
      "Nutritious feed formulated to meet the dietary needs of livestock for growth, health, and productivity. Contains essential vitamins, minerals, and proteins for balanced nutrition.",
      150,
      1249,
      "https://www.partnersinfoodsolutions.com/sites/default/files/styles/blog_post/public/blog-images/IMG_6231.jpg?itok=S1B-mZGw",
    ),
    (
      "Crop Protection Net",
      "Durable netting designed to protect crops from birds, pests, and harsh weather conditions. Provides reliable protection while allowing air circulation and sunlight penetration.",
      60,
      2999,
      "https://m.media-amazon.com/images/I/61YeSepWIsL._AC_UF1000,1000_QL80_.jpg",
    ),
    (
      "Soil Moisture Meter",
      "Precision soil moisture meter for accurate measurement of moisture levels in the soil. Helps optimize irrigation scheduling and prevent under or over-watering of crops.",
      25,
      4999,
      "https://cdn11.bigcommerce.com/s-625n27otji/images/stencil/1280x1280/products/1644/2660/ph-moisture-meter-1__41741.1639395104.jpg?c=1",
    ),
    (
      "Weather Station",
      "Advanced weather monitoring station for tracking temperature, humidity, rainfall, wind speed, and other meteorological parameters. Provides real-time data for informed farming decisions.",
      8,
      29999,
      "https://store.wildernesslabs.co/cdn/shop/products/IMG_3586_1024x1024@2x.jpg?v=1684531864",
    ),
    (
      "Drip Irrigation Kit",
      "Efficient drip irrigation kit for delivering water directly to the root zone of plants. Reduces water wastage, promotes healthier plants, and conserves water resources.",
      20,
      9999,
      "https://m.media-amazon.com/images/I/81WA-RhHvcL._SL1500_.jpg",
    ),
    (
      "Hand Tools Set",
      "Comprehensive set of hand tools for various farming tasks including digging, planting, pruning, and weeding. Made from durable materials for long-lasting performance.",
      100,
      7999,
      "https://pictures-kenya.jijistatic.com/6868812_s-l1600-1_620x620.jpg",
    ),
    (
      "Planting Trays",
      "Sturdy planting trays designed for seed starting and propagation. Features multiple cells for organizing seeds and promoting healthy root development in young plants.",
      80,
      699,
      "https://makimara.co.ke/wp-content/uploads/2023/02/seedling-trays-in-kenya.jpg",
    ),
    (
      "Agricultural Sprayer",
      "Versatile agricultural sprayer for applying pesticides, fertilizers, and herbicides to crops. Offers adjustable spray patterns, ergonomic design, and efficient operation.",
      35,
      12999,
      "https://www.deere.co.uk/assets/images/region-2/products/sprayers/john-deere-self-propelled-sprayer-wheat.jpg",
    ),
    (
      "Grow Lights",
      "Energy-efficient LED grow lights for indoor farming and greenhouse cultivation. Mimics natural sunlight to promote photosynthesis and healthy growth of plants.",
      10,
      14999,
      "https://assets.wfcdn.com/im/70729900/compr-r85/1752/175214516/yescom-grow-light.jpg",
    ),
    (
      "Compost Bin",
      "Durable compost bin for recycling organic waste into nutrient-rich compost for soil improvement. Features easy-to-use design and proper aeration for efficient composting. Ideal for sustainable waste management and enhancing soil fertility.",
      25,
      3999,
      "https://www.planetnatural.com/wp-content/uploads/2023/01/compost-tumbler.jpg",
    ),
];

pub fn catalogue() -> Vec<Product> {
  CATALOGUE
    .iter()
    .map(|(name, description, stock, price_cents, image_url)| {
      Product::new(*name, *description, *stock, *price_cents, *image_url)
    })
    .collect()
}

/// Inserts the catalogue when the product table is empty. Returns how many products were added.
#[instrument(name = "seed::catalogue", skip(products), err(Display))]
pub async fn seed_catalogue(products: &ProductRepository) -> ShopResult<usize> {
  if products.count().await? > 0 {
    info!("Catalogue already present, skipping seed.");
    return Ok(0);
  }
  let mut inserted = 0;
  for product in catalogue() {
    products.add_product(product).await?;
    inserted += 1;
  }
  info!(inserted, "Catalogue seeded.");
  Ok(inserted)
}
