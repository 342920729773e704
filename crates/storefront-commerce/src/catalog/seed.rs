//! Seed catalog shipped with the storefront.

use crate::catalog::Product;
use crate::money::{Currency, Money};

const CDN: &str = "https://cdn.pixabay.com/photo";

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    price: f64,
    sizes: &'static [&'static str],
    colors: &'static [&'static str],
    thumbnail: &'static str,
    images: &'static [(&'static str, &'static str)],
    description: &'static str,
    rating: f32,
}

impl SeedProduct {
    fn build(&self, currency: Currency) -> Product {
        let mut product = Product::new(self.id, self.name, Money::from_decimal(self.price, currency))
            .with_sizes(self.sizes.iter().copied())
            .with_colors(self.colors.iter().copied())
            .with_thumbnail(format!("{CDN}/{}", self.thumbnail))
            .with_description(self.description)
            .with_rating(self.rating);
        for (color, path) in self.images {
            product = product.with_color_image(*color, format!("{CDN}/{path}"));
        }
        product
    }
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: "1",
        name: "Floral Maxi Dress",
        price: 4500.0,
        sizes: &["S", "M", "L"],
        colors: &["#FFC0CB", "#000000"],
        thumbnail: "2020/03/12/00/52/nonbinary-4923610_640.jpg",
        images: &[
            ("#FFC0CB", "2020/03/12/00/52/nonbinary-4923610_1280.jpg"),
            ("#000000", "2024/07/22/06/38/woman-8911930_1280.jpg"),
        ],
        description: "Elegant floral dress perfect for summer outings.",
        rating: 4.5,
    },
    SeedProduct {
        id: "2",
        name: "Silk Blouse",
        price: 5900.99,
        sizes: &["XS", "S", "M"],
        colors: &["#F5F5DC", "#DDA0DD"],
        thumbnail: "2023/05/25/13/10/woman-8017358_640.jpg",
        images: &[
            ("#F5F5DC", "2023/05/25/13/10/woman-8017358_1280.jpg"),
            ("#DDA0DD", "2021/03/26/11/16/woman-6127233_1280.jpg"),
        ],
        description: "Silky smooth blouse for casual and formal occasions.",
        rating: 4.8,
    },
    SeedProduct {
        id: "3",
        name: "High-Waisted Jeans",
        price: 7900.99,
        sizes: &["M", "L", "XL"],
        colors: &["#1E90FF", "#708090"],
        thumbnail: "2017/08/06/01/24/people-2587437_640.jpg",
        images: &[
            ("#1E90FF", "2017/08/06/01/24/people-2587437_1280.jpg"),
            ("#708090", "2021/01/15/19/28/jeans-5919633_1280.jpg"),
        ],
        description: "Comfortable high-waisted jeans that fit any style.",
        rating: 4.3,
    },
    SeedProduct {
        id: "4",
        name: "Leather Jacket",
        price: 12900.99,
        sizes: &["M", "L"],
        colors: &["#000000"],
        thumbnail: "2024/01/20/13/44/woman-8521140_640.jpg",
        images: &[("#000000", "2024/01/20/13/44/woman-8521140_1280.jpg")],
        description: "Classic black leather jacket with premium feel.",
        rating: 4.9,
    },
    SeedProduct {
        id: "5",
        name: "Knit Sweater",
        price: 6900.99,
        sizes: &["S", "M", "L"],
        colors: &["#8B4513", "#FFFACD"],
        thumbnail: "2020/02/01/16/41/girl-4810719_640.jpg",
        images: &[
            ("#8B4513", "2020/02/01/16/41/girl-4810719_1280.jpg"),
            ("#FFFACD", "2019/12/14/21/14/woman-4695491_1280.jpg"),
        ],
        description: "Warm and stylish sweater for cold weather.",
        rating: 4.4,
    },
    SeedProduct {
        id: "6",
        name: "Denim Skirt",
        price: 4900.99,
        sizes: &["XS", "S", "M", "L"],
        colors: &["#4682B4"],
        thumbnail: "2019/07/26/06/12/girl-4364019_640.jpg",
        images: &[("#4682B4", "2019/07/26/06/12/girl-4364019_1280.jpg")],
        description: "Trendy denim skirt with perfect fit and length.",
        rating: 4.2,
    },
    SeedProduct {
        id: "7",
        name: "Graphic Tee",
        price: 2999.99,
        sizes: &["S", "M", "L"],
        colors: &["#FFFFFF", "#000000"],
        thumbnail: "2016/11/14/04/57/woman-1822656_640.jpg",
        images: &[
            ("#FFFFFF", "2016/11/14/04/57/woman-1822656_1280.jpg"),
            ("#000000", "2016/03/27/22/22/hipster-1283826_1280.jpg"),
        ],
        description: "Soft cotton tee with stylish graphic prints.",
        rating: 4.1,
    },
    SeedProduct {
        id: "8",
        name: "Chic Jumpsuit",
        price: 8500.99,
        sizes: &["S", "M", "L"],
        colors: &["#FF69B4", "#FFD700"],
        thumbnail: "2021/04/03/02/52/ao-dai-6146369_640.jpg",
        images: &[
            ("#FF69B4", "2021/04/03/02/52/ao-dai-6146369_1280.jpg"),
            ("#FFD700", "2019/06/05/14/32/jumpsuit-4253906_1280.jpg"),
        ],
        description: "Modern jumpsuit perfect for casual parties.",
        rating: 4.6,
    },
];

const PROMOTIONS: &[SeedProduct] = &[SeedProduct {
    id: "s1",
    name: "Summer Sale Skirt",
    price: 2999.99,
    sizes: &["S", "M"],
    colors: &["#FF7F50", "#FFD700"],
    thumbnail: "2023/09/02/11/53/woman-8228748_1280.jpg",
    images: &[
        ("#FF7F50", "2023/09/02/11/53/woman-8228748_1280.jpg"),
        ("#FFD700", "2019/10/12/16/03/skirt-4544372_1280.jpg"),
    ],
    description: "Limited time offer for stylish summer skirts.",
    rating: 4.6,
}];

/// The regular product list.
pub fn seed_products(currency: Currency) -> Vec<Product> {
    PRODUCTS.iter().map(|p| p.build(currency)).collect()
}

/// The "Shop Now" promotional list.
pub fn seed_promotions(currency: Currency) -> Vec<Product> {
    PROMOTIONS.iter().map(|p| p.build(currency)).collect()
}
