use crate::shared::*;

/// Populate the ItemRegistry with every base-game item the overlay can name:
/// crop harvests, forage from wild seeds, fruit, fertilizers and the artisan
/// goods machines hold while processing.
pub fn populate_items(registry: &mut ItemRegistry) {
    let items: &[(&str, &str, ItemCategory)] = &[
        // ── Crops ──────────────────────────────────────────────────────────
        ("parsnip", "Parsnip", ItemCategory::Crop),
        ("potato", "Potato", ItemCategory::Crop),
        ("cauliflower", "Cauliflower", ItemCategory::Crop),
        ("strawberry", "Strawberry", ItemCategory::Crop),
        ("melon", "Melon", ItemCategory::Crop),
        ("tomato", "Tomato", ItemCategory::Crop),
        ("blueberry", "Blueberry", ItemCategory::Crop),
        ("corn", "Corn", ItemCategory::Crop),
        ("pumpkin", "Pumpkin", ItemCategory::Crop),
        ("cranberry", "Cranberries", ItemCategory::Crop),
        ("wheat", "Wheat", ItemCategory::Crop),
        ("beet", "Beet", ItemCategory::Crop),
        ("unmilled_rice", "Unmilled Rice", ItemCategory::Crop),
        ("hops", "Hops", ItemCategory::Crop),
        ("coffee_bean", "Coffee Bean", ItemCategory::Crop),
        ("ancient_fruit", "Ancient Fruit", ItemCategory::Crop),
        ("tea_leaves", "Tea Leaves", ItemCategory::Crop),
        // ── Seeds & saplings ───────────────────────────────────────────────
        ("parsnip_seeds", "Parsnip Seeds", ItemCategory::Seed),
        ("spring_seeds", "Spring Seeds", ItemCategory::Seed),
        (TEA_SAPLING_ID, "Tea Sapling", ItemCategory::Seed),
        // ── Forage (wild seed harvests) ────────────────────────────────────
        ("wild_horseradish", "Wild Horseradish", ItemCategory::Forage),
        ("daffodil", "Daffodil", ItemCategory::Forage),
        ("leek", "Leek", ItemCategory::Forage),
        ("dandelion", "Dandelion", ItemCategory::Forage),
        // ── Fruit ──────────────────────────────────────────────────────────
        ("apple", "Apple", ItemCategory::Fruit),
        ("apricot", "Apricot", ItemCategory::Fruit),
        ("cherry", "Cherry", ItemCategory::Fruit),
        ("orange", "Orange", ItemCategory::Fruit),
        ("peach", "Peach", ItemCategory::Fruit),
        ("pomegranate", "Pomegranate", ItemCategory::Fruit),
        ("mango", "Mango", ItemCategory::Fruit),
        ("banana", "Banana", ItemCategory::Fruit),
        // ── Fertilizers ────────────────────────────────────────────────────
        ("basic_fertilizer", "Basic Fertilizer", ItemCategory::Fertilizer),
        ("quality_fertilizer", "Quality Fertilizer", ItemCategory::Fertilizer),
        ("deluxe_fertilizer", "Deluxe Fertilizer", ItemCategory::Fertilizer),
        ("speed_gro", "Speed-Gro", ItemCategory::Fertilizer),
        ("deluxe_speed_gro", "Deluxe Speed-Gro", ItemCategory::Fertilizer),
        ("hyper_speed_gro", "Hyper Speed-Gro", ItemCategory::Fertilizer),
        ("basic_retaining_soil", "Basic Retaining Soil", ItemCategory::Fertilizer),
        ("quality_retaining_soil", "Quality Retaining Soil", ItemCategory::Fertilizer),
        ("tree_fertilizer", "Tree Fertilizer", ItemCategory::Fertilizer),
        // ── Artisan goods ──────────────────────────────────────────────────
        ("wine", "Wine", ItemCategory::ArtisanGood),
        ("beer", "Beer", ItemCategory::ArtisanGood),
        ("pale_ale", "Pale Ale", ItemCategory::ArtisanGood),
        ("mead", "Mead", ItemCategory::ArtisanGood),
        ("juice", "Juice", ItemCategory::ArtisanGood),
        ("jelly", "Jelly", ItemCategory::ArtisanGood),
        ("pickles", "Pickles", ItemCategory::ArtisanGood),
        ("cheese", "Cheese", ItemCategory::ArtisanGood),
        ("goat_cheese", "Goat Cheese", ItemCategory::ArtisanGood),
        ("cloth", "Cloth", ItemCategory::ArtisanGood),
        ("truffle_oil", "Truffle Oil", ItemCategory::ArtisanGood),
        ("green_tea", "Green Tea", ItemCategory::ArtisanGood),
        ("coffee", "Coffee", ItemCategory::ArtisanGood),
        ("copper_bar", "Copper Bar", ItemCategory::ArtisanGood),
        ("iron_bar", "Iron Bar", ItemCategory::ArtisanGood),
        ("gold_bar", "Gold Bar", ItemCategory::ArtisanGood),
        ("refined_quartz", "Refined Quartz", ItemCategory::ArtisanGood),
        // ── Machines ───────────────────────────────────────────────────────
        ("keg", "Keg", ItemCategory::Machine),
        ("preserves_jar", "Preserves Jar", ItemCategory::Machine),
        ("cheese_press", "Cheese Press", ItemCategory::Machine),
        ("loom", "Loom", ItemCategory::Machine),
        ("furnace", "Furnace", ItemCategory::Machine),
        ("cask", "Cask", ItemCategory::Machine),
        ("heater", HEATER_NAME, ItemCategory::Machine),
        ("garden_pot", "Garden Pot", ItemCategory::Machine),
    ];

    for &(id, name, category) in items {
        registry.items.insert(
            id.to_string(),
            ItemDef {
                id: id.to_string(),
                name: name.to_string(),
                display_name: name.to_string(),
                category,
            },
        );
    }
}
