//! Built-in rule set and replies for TM การช่าง.
//!
//! Used when no catalog file is configured.  Patterns cover formal and
//! casual Thai, common misspellings and romanised Thai.

use super::Category;

/// Keyword rules in priority order: `(category, regex patterns)`.
pub(super) const RULES: &[(Category, &[&str])] = &[
    (
        Category::Owner,
        &[
            "เจ๊", "เจ้", "เจ้แหม่ม", r"j[ae]y?\s?mam", "jmam", "jaokhong", "chaokhong",
            "owner", "boss", "manager", "ผู้บริหาร", "ผู้จัดการ", "เถ้าแก่",
            "เรียนสายเจ้าของ", "คุยกับเจ้าของ", "เบอร์เจ้าของร้าน", "ติดต่อเจ้าของ",
            "ขอสายเจ้าของ",
        ],
    ),
    (
        Category::CarRepair,
        &[
            "ซ่อม", "ซ้อม", "ส้อม", "ซ่อมรถ", "ซ่อมรถยนต์", "รถเสีย", "รถพัง", "แก้รถ",
            "ท่อไอเสีย", "นำรถเข้าซ่อม", "รถเป็นไร", "เช็คสภาพ", "ของเสร็จ",
            "ได้ของวันไหน", "เมื่อไหร่รถจะเสร็จ", "กำหนดการซ่อม", "สถานะการซ่อม",
            "บริการซ่อมบำรุง", "ตรวจสอบสภาพรถ", r"car\s?fix", "repair", r"fix\s?car",
            r"car\s?broken", r"car\s?problem", r"when\s?car\s?finish", r"when\s?car\s?ready",
            r"som\s?rod", r"rot\s?sia", r"rot\s?pang",
        ],
    ),
    (
        Category::Location,
        &[
            "ร้าน.*อยู่", "อยู่ไหน", "แถวไหน", "ไปร้านไง", "พิกัด", "แผนที่", "ขอแผนที่",
            "ขอทราบที่ตั้ง", "ร้านไปยังไง", "ที่ตั้งร้าน", "พิกัดร้าน", "สถานที่ตั้ง",
            "สอบถามเส้นทาง", "โลเคชั่น", "แอดเดรส", "ทางไปร้าน", "บอกทางไป",
            r"google\s?map", "location", "where", "address", "map", "direction",
            r"thi\s?tang", "phikat", r"ran\s?yoo\s?nai", "ร้านอยู่แถวไหน",
            "ขอที่อยู่ร้านหน่อย", "ร้านอยู่ที่ไหน", "ที่อยู่ร้าน", "ร้านตั้งอยู่ไหน",
            "ร้านอยู่มั้ย",
        ],
    ),
    (
        Category::Payment,
        &[
            "จ่าย", "โอน", "ชำระ", "รับเงิน", "เงินสด", "บัตรเครดิต", "เก็บปลายทาง", "cod",
            "ใบกำกับภาษี", "ใบเสร็จ", "ภาษี", "payments?", "transfer", "pay", "cash",
            "bill", "invoice", r"how\s?to\s?pay", "วิธีจ่าย", "โอนเงิน", "จ่ายยังไง",
            "รับเงินสดไหม", "ผ่อนได้ไหม", r"chai\s?ngern", r"on\s?ngern", r"tax\s?invoice",
        ],
    ),
    (
        Category::Price,
        &[
            "ราคา", "เท่าไหร่", "กี่บาท", "ค่าใช้จ่าย", "ประเมินราคา", "ใบเสนอราคา",
            "ราคาสินค้า", "สอบถามราคา", "ตีราคา", "คิดเงิน", "ถูกไหม", "แพงไหม",
            "ราคาเท่าไร", r"how\s?much", "cost", "price", "quote", "estimate",
            r"rao\s?kha", "raka", r"tao\s?rai", "งานนี้เท่าไหร่",
        ],
    ),
    (
        Category::Ordering,
        &[
            "สั่งทำ", "สั่งซื้อ", "สั่งผลิต", "สั่งทำพิเศษ", "การจัดซื้อ", "คำสั่งซื้อ",
            "ทำอะไรได้บ้าง", "สั่งของ", "รับทำอะไร", "อยากให้ทำ", "ออเดอร์", "ออเด้อร์",
            "สั่้ง", "order", "customize", "make", "buy", "request", "fabricate",
            r"sang\s?tham", r"sang\s?sue", "สั่งทำชิ้นนี้",
        ],
    ),
    (
        Category::GeneralHelp,
        &[
            "problem", "issue", "ปัญหา", "มีปัญหา", "ข้อร้องเรียน", "ต้องการความช่วยเหลือ",
            "ต้องการร้องเรียน", "แจ้งปัญหา", "ของมีปัญหา", "ช่วยหน่อย", "complaint", "help",
            "question", "สงสัย", "ไม่เข้าใจ", "มีคำถาม", "สอบถาม", "ข้อสงสัย", "มีไรถาม",
            "อยากถาม", "panha", "chuay", "assistance",
        ],
    ),
];

/// Canned replies: `(category, thai, other)`.
pub(super) const REPLIES: &[(Category, &str, &str)] = &[
    (
        Category::Owner,
        "ผมไม่ใช่เจ๊แหม่มนะคะ หากต้องการคุยกับเจ้าของร้าน TM การช่าง โทร 0810891585 ค่ะ ถ้าสายไม่ว่าง รบกวนโทรกลับใน 1 นาที ไม่ต้องกังวลนะคะ",
        "This is not Je Mam. To speak with the owner of TM การช่าง, please call 0810891585. If the line is busy, try calling back in a minute, no need to worry.",
    ),
    (
        Category::CarRepair,
        "เรื่องการซ่อมรถหรือวันเสร็จ ต้องคุยกับช่างตี๋โดยตรงค่ะ โทร 0818981016 ได้เลยนะคะ",
        "For car repairs or completion dates, please contact Technician Tee directly at 0818981016.",
    ),
    (
        Category::Location,
        "ร้าน TM การช่าง อยู่ที่: 122/79 นาเกลือ ซอย 24, ต.นาเกลือ, บางนา, 94000 ติดต่อเจ้าของร้านที่ 0810891585 ค่ะ ถ้าสายไม่ว่าง รบกวนโทรกลับใน 1 นาที ไม่ต้องกังวลนะคะ",
        "TM การช่าง is located at: 122/79 Naklua Soi 24, Naklua, Bangna, 94000, Thailand. Contact the owner at 0810891585. If the line is busy, try calling back in a minute, no need to worry.",
    ),
    (
        Category::Ordering,
        "รบกวนแจ้งด้วยค่ะว่าอยากสั่งทำอะไร หรือให้ TM การช่าง ช่วยเรื่องแบบไหนคะ? การสั่งทำขึ้นอยู่กับประเภทงาน ราคาวัสดุโลหะในตลาด และปัจจัยอื่นๆ สามารถขอใบเสนอราคาได้ ติดต่อเจ้าของร้านที่ 0810891585 ค่ะ ถ้าสายไม่ว่าง รบกวนโทรกลับใน 1 นาที ไม่ต้องกังวลนะคะ",
        "Please let us know what you'd like to order or customize at TM การช่าง. The order depends on the type of task, the universal price of metal, and other factors. You can request a quotation. Contact the owner at 0810891585. If the line is busy, try calling back in a minute, no need to worry.",
    ),
    (
        Category::GeneralHelp,
        "หากมีปัญหาหรือข้อสงสัยใดๆ เกี่ยวกับ TM การช่าง รบกวนติดต่อเจ้าของร้านที่ 0810891585 ค่ะ ถ้าสายไม่ว่าง รบกวนโทรกลับใน 1 นาที ไม่ต้องกังวลนะคะ",
        "For any issues or questions regarding TM การช่าง, please contact the owner at 0810891585. If the line is busy, try calling back in a minute, no need to worry.",
    ),
    (
        Category::Payment,
        "โอนเข้า 'ทีเอ็มการช่าง' เท่านั้นค่ะ พนักงานไม่ได้รับอนุญาตให้รับเงินโดยตรง สำหรับเงินสดสามารถชำระได้ที่หน้าร้านครับ มีบริการเก็บเงินปลายทางสำหรับบางพื้นที่และสามารถออกใบกำกับภาษีได้ ติดต่อเจ้าของร้านที่ 0810891585 สำหรับรายละเอียดเพิ่มเติมค่ะ ถ้าสายไม่ว่าง รบกวนโทรกลับใน 1 นาที",
        "Please transfer to 'ทีเอ็มการช่าง' only. Our staff cannot receive direct payments. Cash is accepted at the store, COD is available for some areas, and we can issue tax invoices. Contact the owner at 0810891585 for details. If the line is busy, try calling back in a minute.",
    ),
    (
        Category::Price,
        "รบกวนแจ้งวัสดุ ขนาด หรือประเภทงานที่ต้องการ เพื่อให้ TM การช่าง ประเมินราคาค่ะ ราคาขึ้นอยู่กับประเภทงาน ราคาวัสดุโลหะในตลาด และปัจจัยอื่นๆ สามารถขอใบเสนอราคาได้ ติดต่อเจ้าของร้านที่ 0810891585 เพื่อคุยรายละเอียดค่ะ ถ้าสายไม่ว่าง รบกวนโทรกลับใน 1 นาที ไม่ต้องกังวลนะคะ",
        "Please specify the material, size, or type of work for a quote. The price depends on the type of task, the universal price of metal, and other factors. You can request a formal quotation. Contact the owner at 0810891585 for details. If the line is busy, try calling back in a minute, no need to worry.",
    ),
    (
        Category::Unrelated,
        "ขออภัยค่ะ เรื่องนี้ไม่เกี่ยวกับบริการของทางร้าน หากต้องการความช่วยเหลือเพิ่มเติมเกี่ยวกับงานเหล็ก ติดต่อเจ้าของร้านได้ที่ 0810891585 ค่ะ",
        "Sorry, that question is not related to our business. For assistance with our metal fabrication services, please contact the owner at 0810891585.",
    ),
];
