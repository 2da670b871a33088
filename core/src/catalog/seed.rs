// storefront/src/catalog/seed.rs

//! The default catalog written on first run and on reset.

use crate::catalog::product::Product;

fn product(
  id: u64,
  name: &str,
  category: &str,
  price: u64,
  image: &str,
  description: &str,
  sizes: &[&str],
) -> Product {
  Product {
    id,
    name: name.to_string(),
    category: category.to_string(),
    price,
    image: image.to_string(),
    description: description.to_string(),
    sizes: sizes.iter().map(|s| s.to_string()).collect(),
  }
}

/// Twelve products with ids 1..=12, in display order.
pub fn default_catalog() -> Vec<Product> {
  vec![
    product(
      1,
      "Классический костюм Noir",
      "Костюмы",
      45000,
      "/photos/suit-noir.jpg",
      "Классический черный костюм из итальянской шерсти. Идеальный выбор для деловых встреч и торжественных мероприятий.",
      &["46", "48", "50", "52", "54"],
    ),
    product(
      2,
      "Бомбер Orange Horizon",
      "Верхняя одежда",
      18500,
      "/photos/bomber-orange.jpg",
      "Стильный бомбер с фирменными акцентами. Высококачественная фурнитура и водоотталкивающая ткань.",
      &["S", "M", "L", "XL"],
    ),
    product(
      3,
      "Бархатный вечерний пиджак",
      "Костюмы",
      32000,
      "/photos/velvet-blazer.jpg",
      "Бархатный пиджак глубокого темного оттенка. Роскошь в каждой детали.",
      &["48", "50", "52"],
    ),
    product(
      4,
      "Кожаные дерби Minimalist",
      "Обувь",
      24000,
      "/photos/derby-shoes.jpg",
      "Классические дерби из натуральной кожи ручной работы. Комфорт и элегантность.",
      &["40", "41", "42", "43", "44", "45"],
    ),
    product(
      5,
      "Худи MCR Signature",
      "Повседневное",
      12000,
      "/photos/hoodie-signature.jpg",
      "Худи оверсайз кроя с вышитым логотипом. Плотный хлопок премиум качества.",
      &["S", "M", "L", "XL", "XXL"],
    ),
    product(
      6,
      "Кашемировая водолазка",
      "Повседневное",
      15500,
      "/photos/cashmere-rollneck.jpg",
      "Водолазка из 100% кашемира. Невероятно мягкая и теплая.",
      &["M", "L", "XL"],
    ),
    product(
      7,
      "Шелковый платок",
      "Аксессуары",
      3500,
      "/photos/silk-square.jpg",
      "Нагрудный платок из натурального шелка с абстрактным узором.",
      &["One Size"],
    ),
    product(
      8,
      "Пальто Modern Classic",
      "Верхняя одежда",
      54000,
      "/photos/coat-classic.jpg",
      "Пальто прямого кроя. Строгие линии и тепло.",
      &["30", "32", "34", "36"],
    ),
    product(
      9,
      "Брюки Карго Tactical",
      "Повседневное",
      14500,
      "/photos/cargo-pants.jpg",
      "Брюки карго с анатомическим кроем. Идеальное сочетание стиля и удобства.",
      &["30", "32", "34", "36"],
    ),
    product(
      10,
      "Сумка Weekender",
      "Аксессуары",
      38000,
      "/photos/bag-weekender.jpg",
      "Кожаная дорожная сумка. Вместительная и стильная.",
      &["One Size"],
    ),
    product(
      11,
      "Очки Aviator Black",
      "Аксессуары",
      11000,
      "/photos/sunglasses.jpg",
      "Солнцезащитные очки в черной оправе. Поляризационные линзы.",
      &["One Size"],
    ),
    product(
      12,
      "Челси Suede",
      "Обувь",
      28000,
      "/photos/chelsea-boots.jpg",
      "Замшевые ботинки челси. Итальянская колодка.",
      &["41", "42", "43", "44"],
    ),
  ]
}
