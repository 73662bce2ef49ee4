// 用户错误
// 11xxx
pub const USER_NOT_FOUND: u32 = 11001;
pub const USERNAME_ALREADY_EXISTS: u32 = 11002;
pub const INVALID_PASSWORD: u32 = 11003;
pub const EMAIL_ALREADY_EXISTS: u32 = 11004;
pub const EMAIL_NOT_FOUND: u32 = 11005;

// token错误
// 12xxx
pub const INVALID_TOKEN: u32 = 12001;
pub const TOKEN_EXPIRED: u32 = 12002;
pub const MISSING_TOKEN: u32 = 12003;
pub const TOKEN_CREATION_ERROR: u32 = 12004;

// db错误
// 13xxx
pub const SOMETHING_WENT_WRONG: u32 = 13001;
pub const UNIQUE_CONSTRAINT_VIOLATION: u32 = 13002;

// 成绩/徽章错误
// 14xxx
pub const GAME_INVALID_INPUT: u32 = 14001;
pub const GAME_NOT_FOUND: u32 = 14002;
pub const GAME_CONFLICT: u32 = 14003;
pub const GAME_INTERNAL: u32 = 14004;

// 商店错误
// 15xxx
pub const SHOP_ITEM_NOT_FOUND: u32 = 15001;
pub const SHOP_ITEM_INACTIVE: u32 = 15002;
pub const SHOP_ITEM_ALREADY_OWNED: u32 = 15003;
pub const SHOP_INSUFFICIENT_POINTS: u32 = 15004;

// request错误
// 20xxx
pub const VALIDATION_ERROR: u32 = 20001;
pub const JSON_REJECTION: u32 = 20002;
pub const QUERY_REJECTION: u32 = 20003;
