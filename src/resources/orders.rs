//! Order search, lookup, and status changes.
//!
//! Apart from [`OrderCount`], these APIs take their parameters as a `<Req>`
//! XML document sent in a form body. The caller passes the content of `<Req>`
//! as a tree:
//!
//! ```rust,ignore
//! use yahoo_shopping_api::resources::OrderList;
//! use yahoo_shopping_api::Tree;
//!
//! let mut params = Tree::from_pairs([("SellerId", "snbx-store")]);
//! params
//!     .entry_map("Search")
//!     .entry_map("Condition")
//!     .insert("OrderTimeFrom", "20240101000000");
//!
//! let orders = OrderList::request_all(&client, params).await?;
//! ```

use crate::clients::{BodyEncoding, ClientError, HttpClient, HttpMethod, HttpRequest, Paginator};
use crate::codec::xml;
use crate::resources::{circus_endpoint, list_at, status_ok, Endpoint, StoreEndpoint};
use crate::tree::Tree;

/// Every field [`OrderInfo`] can return; used when `Target/Field` is not set.
pub const ORDER_INFO_FIELDS: &str = concat!(
    "OrderId,Version,ParentOrderId,ChildOrderId,DeviceType,",
    "MobileCarrierName,IsSeen,IsSplit,CancelReason,",
    "CancelReasonDetail,IsRoyalty,IsRoyaltyFix,IsSeller,",
    "IsAffiliate,IsRatingB2s,NeedSnl,OrderTime,LastUpdateTime,",
    "Suspect,SuspectMessage,OrderStatus,StoreStatus,",
    "RoyaltyFixTime,SendConfirmTime,SendPayTime,PrintSlipTime,",
    "PrintDeliveryTime,PrintBillTime,BuyerComments,SellerComments,",
    "Notes,OperationUser,Referer,EntryPoint,HistoryId,UsageId,",
    "UseCouponData,TotalCouponDiscount,ShippingCouponFlg,",
    "ShippingCouponDiscount,CampaignPoints,IsMultiShip,",
    "MultiShipId,IsReadOnly,IsFirstClassDrugIncludes,",
    "IsFirstClassDrugAgreement,IsWelcomeGiftIncludes,",
    "YamatoCoopStatus,FraudHoldStatus,PublicationTime,",
    "IsYahooAuctionOrder,YahooAuctionMerchantId,YahooAuctionId,",
    "IsYahooAuctionDeferred,YahooAuctionCategoryType,",
    "YahooAuctionBidType,UseGiftCardData,PayStatus,SettleStatus,",
    "PayType,PayKind,PayMethod,PayMethodName,SellerHandlingCharge,",
    "PayActionTime,PayDate,PayNotes,SettleId,CardBrand,CardNumber,",
    "CardNumberLast4,CardExpireYear,CardExpireMonth,CardPayType,",
    "CardHolderName,CardPayCount,CardBirthDay,UseYahooCard,",
    "UseWallet,NeedBillSlip,NeedDetailedSlip,NeedReceipt,",
    "AgeConfirmField,AgeConfirmValue,AgeConfirmCheck,",
    "BillAddressFrom,BillFirstName,BillFirstNameKana,BillLastName,",
    "BillLastNameKana,BillZipCode,BillPrefecture,",
    "BillPrefectureKana,BillCity,BillCityKana,BillAddress1,",
    "BillAddress1Kana,BillAddress2,BillAddress2Kana,",
    "BillPhoneNumber,BillEmgPhoneNumber,BillMailAddress,",
    "BillSection1Field,BillSection1Value,BillSection2Field,",
    "BillSection2Value,PayNo,PayNoIssueDate,ConfirmNumber,",
    "PaymentTerm,IsApplePay,ShipStatus,ShipMethod,ShipMethodName,",
    "ShipRequestDate,ShipRequestTime,ShipNotes,ShipCompanyCode,",
    "ReceiveShopCode,ShipInvoiceNumber1,ShipInvoiceNumber2,",
    "ShipInvoiceNumberEmptyReason,ShipUrl,ArriveType,ShipDate,",
    "ArrivalDate,NeedGiftWrap,GiftWrapCode,GiftWrapType,",
    "GiftWrapMessage,NeedGiftWrapPaper,GiftWrapPaperType,",
    "GiftWrapName,Option1Field,Option1Type,Option1Value,",
    "Option2Field,Option2Type,Option2Value,ShipFirstName,",
    "ShipFirstNameKana,ShipLastName,ShipLastNameKana,ShipZipCode,",
    "ShipPrefecture,ShipPrefectureKana,ShipCity,ShipCityKana,",
    "ShipAddress1,ShipAddress1Kana,ShipAddress2,ShipAddress2Kana,",
    "ShipPhoneNumber,ShipEmgPhoneNumber,ShipSection1Field,",
    "ShipSection1Value,ShipSection2Field,ShipSection2Value,",
    "ReceiveSatelliteType,ReceiveSatelliteSettleMethod,",
    "ReceiveSatelliteMethod,ReceiveSatelliteCompanyName,",
    "ReceiveSatelliteShopCode,ReceiveSatelliteShopName,",
    "ReceiveSatelliteShipKind,ReceiveSatelliteYahooCode,",
    "ReceiveSatelliteCertificationNumber,CollectionDate,",
    "CashOnDeliveryTax,NumberUnitsShipped,ShipRequestTimeZoneCode,",
    "ShipInstructType,ShipInstructStatus,ReceiveShopType,",
    "ReceiveShopName,ExcellentDelivery,IsEazy,EazyDeliveryCode,",
    "EazyDeliveryName,PayCharge,ShipCharge,GiftWrapCharge,",
    "Discount,Adjustments,SettleAmount,UsePoint,GiftCardDiscount,",
    "TotalPrice,SettlePayAmount,IsGetPointFixAll,",
    "TotalMallCouponDiscount,IsGetStoreBonusFixAll,LineId,ItemId,",
    "Title,SubCode,SubCodeOption,ItemOption,Inscription,IsUsed,",
    "ImageId,IsTaxable,ItemTaxRatio,Jan,ProductId,CategoryId,",
    "AffiliateRatio,UnitPrice,Quantity,PointAvailQuantity,",
    "ReleaseDate,PointFspCode,PointRatioY,PointRatioSeller,",
    "UnitGetPoint,IsGetPointFix,GetPointFixDate,CouponData,",
    "CouponDiscount,CouponUseNum,OriginalPrice,OriginalNum,",
    "LeadTimeText,LeadTimeStart,LeadTimeEnd,PriceType,",
    "PickAndDeliveryCode,PickAndDeliveryTransportRuleType,",
    "YamatoUndeliverableReason,StoreBonusRatioSeller,",
    "UnitGetStoreBonus,IsGetStoreBonusFix,GetStoreBonusFixDate,",
    "SellerId,IsLogin,GuestAuthId",
);

/// Every field [`OrderList`] can return; used when `Search/Field` is not set.
pub const ORDER_LIST_FIELDS: &str = concat!(
    "OrderId,Version,OriginalOrderId,ParentOrderId,DeviceType,",
    "IsSeen,IsSplit,IsRoyalty,IsSeller,IsAffiliate,IsRatingB2s,",
    "OrderTime,ExistMultiReleaseDate,ReleaseDate,LastUpdateTime,",
    "Suspect,OrderStatus,StoreStatus,RoyaltyFixTime,PrintSlipFlag,",
    "PrintDeliveryFlag,PrintBillFlag,BuyerCommentsFlag,PayStatus,",
    "SettleStatus,PayType,PayMethod,PayMethodName,PayDate,SettleId,",
    "UseWallet,NeedBillSlip,NeedDetailedSlip,NeedReceipt,",
    "BillFirstName,BillFirstNameKana,BillLastName,",
    "BillLastNameKana,BillPrefecture,ShipStatus,ShipMethod,",
    "ShipMethodName,ShipRequestDate,ShipRequestTime,ShipNotes,",
    "ShipCompanyCode,ReceiveShopCode,ShipInvoiceNumber1,",
    "ShipInvoiceNumber2,ShipInvoiceNumberEmptyReason,ShipUrl,",
    "ArriveType,ShipDate,NeedGiftWrap,NeedGiftWrapMessage,",
    "NeedGiftWrapPaper,ShipFirstName,ShipFirstNameKana,",
    "ShipLastName,ShipLastNameKana,ShipPrefecture,PayCharge,",
    "ShipCharge,GiftWrapCharge,Discount,GiftCardDiscount,UsePoint,",
    "TotalPrice,RefundTotalPrice,IsGetPointFixAll,SellerId,",
    "IsLogin,PayNo,PayNoIssueDate,SellerType,IsPayManagement,",
    "ArrivalDate,TotalMallCouponDiscount,IsReadOnly,IsApplePay,",
    "IsFirstClassDrugIncludes,IsFirstClassDrugAgreement,",
    "IsWelcomeGiftIncludes,ReceiveSatelliteType,ShipInstructType,",
    "ShipInstructStatus,YamatoCoopStatus,ReceiveShopType,",
    "ReceiveShopName,ExcellentDelivery,IsEazy,EazyDeliveryCode,",
    "EazyDeliveryName,FraudHoldStatus,PublicationTime,",
    "IsYahooAuctionOrder,YahooAuctionMerchantId,YahooAuctionId,",
    "IsYahooAuctionDeferred,YahooAuctionCategoryType,",
    "YahooAuctionBidType",
);

/// Default page size of [`OrderList::request_all`].
pub const ORDER_LIST_PAGE_SIZE: u64 = 10;

/// Sends `params` as the `<Req>` document of an order API.
async fn post_req(client: &HttpClient, url: &str, params: &Tree) -> Result<Tree, ClientError> {
    let document = xml::encode("Req", params)?;
    let request = HttpRequest::builder(HttpMethod::Post, url)
        .encoding(BodyEncoding::Form)
        .text(document)
        .build()?;
    client.request(request).await
}

/// Fetches the details of one order.
#[derive(Clone, Copy, Debug)]
pub struct OrderInfo;

impl StoreEndpoint for OrderInfo {
    const NAME: &'static str = "orderInfo";
    const ENDPOINT: Endpoint = circus_endpoint!("orderInfo");
    const SELLER_KEY: &'static str = "SellerId";
}

impl OrderInfo {
    /// Returns the `Result/OrderInfo` subtree, or an empty map when absent.
    ///
    /// `Target/Field` defaults to [`ORDER_INFO_FIELDS`].
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `SellerId` is missing or the call fails.
    pub async fn request(client: &HttpClient, mut params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        params
            .entry_map("Target")
            .insert_default("Field", ORDER_INFO_FIELDS);

        let mut response = post_req(client, url, &params).await?;
        Ok(response
            .get_mut("Result")
            .and_then(|result| result.remove("OrderInfo"))
            .unwrap_or_default())
    }
}

/// Searches orders.
#[derive(Clone, Copy, Debug)]
pub struct OrderList;

impl StoreEndpoint for OrderList {
    const NAME: &'static str = "orderList";
    const ENDPOINT: Endpoint = circus_endpoint!("orderList");
    const SELLER_KEY: &'static str = "SellerId";
}

impl OrderList {
    /// Returns one page of results as the full response tree.
    ///
    /// `Search/Field` defaults to [`ORDER_LIST_FIELDS`].
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `SellerId` is missing or the call fails.
    pub async fn request(client: &HttpClient, mut params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        params
            .entry_map("Search")
            .insert_default("Field", ORDER_LIST_FIELDS);

        post_req(client, url, &params).await
    }

    /// Returns every matching order, requesting the pages one by one.
    ///
    /// `Search/Result` sets the page size (default
    /// [`ORDER_LIST_PAGE_SIZE`]); `Search/Start` is overwritten for each page.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `SellerId` is missing, the page size is
    /// not a positive number, or any page fails.
    pub async fn request_all(client: &HttpClient, mut params: Tree) -> Result<Vec<Tree>, ClientError> {
        Self::url(&params)?;

        let search = params.entry_map("Search");
        search.insert_default("Field", ORDER_LIST_FIELDS);
        let page_size = search
            .insert_default("Result", ORDER_LIST_PAGE_SIZE)
            .as_u64()
            .unwrap_or(0);

        let paginator = Paginator::new(page_size, Self::total_count, Self::orders)?;
        paginator
            .fetch_all(|start| {
                let mut page_params = params.clone();
                page_params.entry_map("Search").insert("Start", start);
                async move { Self::request(client, page_params).await }
            })
            .await
    }

    fn total_count(page: &Tree) -> u64 {
        page.pointer(&["Search", "TotalCount"])
            .and_then(Tree::as_u64)
            .unwrap_or(0)
    }

    fn orders(page: &Tree) -> Vec<Tree> {
        list_at(page, &["Search", "OrderInfo"])
    }
}

/// Counts orders by status for the store's dashboard.
#[derive(Clone, Copy, Debug)]
pub struct OrderCount;

impl StoreEndpoint for OrderCount {
    const NAME: &'static str = "orderCount";
    const ENDPOINT: Endpoint = circus_endpoint!("orderCount");
    const SELLER_KEY: &'static str = "sellerId";
}

impl OrderCount {
    /// Returns the `Result/Count` subtree when `Result/Status` is `OK`, and
    /// an empty map otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `sellerId` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        let request = HttpRequest::builder(HttpMethod::Get, url)
            .payload(params)
            .build()?;
        let response = client.request(request).await?;

        if !status_ok(&response, &["Result", "Status"]) {
            return Ok(Tree::empty_map());
        }
        Ok(response
            .pointer(&["Result", "Count"])
            .cloned()
            .unwrap_or_default())
    }
}

/// Updates order fields such as store status or notes.
#[derive(Clone, Copy, Debug)]
pub struct OrderChange;

impl StoreEndpoint for OrderChange {
    const NAME: &'static str = "orderChange";
    const ENDPOINT: Endpoint = circus_endpoint!("orderChange");
    const SELLER_KEY: &'static str = "SellerId";
}

impl OrderChange {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `SellerId` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        post_req(client, url, &params).await
    }

    /// Returns `true` when `Result/Status` is `OK`.
    #[must_use]
    pub fn is_success(response: &Tree) -> bool {
        status_ok(response, &["Result", "Status"])
    }

    /// Returns `Result/Warning` as a list.
    #[must_use]
    pub fn warnings(response: &Tree) -> Vec<Tree> {
        list_at(response, &["Result", "Warning"])
    }
}

/// Adds line items to an existing order.
#[derive(Clone, Copy, Debug)]
pub struct OrderItemAdd;

impl StoreEndpoint for OrderItemAdd {
    const NAME: &'static str = "orderItemAdd";
    const ENDPOINT: Endpoint = circus_endpoint!("orderItemAdd");
    const SELLER_KEY: &'static str = "SellerId";
}

impl OrderItemAdd {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `SellerId` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        post_req(client, url, &params).await
    }

    /// Returns `true` when `Result/Status` is `OK`.
    #[must_use]
    pub fn is_success(response: &Tree) -> bool {
        status_ok(response, &["Result", "Status"])
    }

    /// Returns `Result/Warning` as a list.
    #[must_use]
    pub fn warnings(response: &Tree) -> Vec<Tree> {
        list_at(response, &["Result", "Warning"])
    }
}

/// Changes the payment status of an order.
#[derive(Clone, Copy, Debug)]
pub struct OrderPayStatusChange;

impl StoreEndpoint for OrderPayStatusChange {
    const NAME: &'static str = "orderPayStatusChange";
    const ENDPOINT: Endpoint = circus_endpoint!("orderPayStatusChange");
    const SELLER_KEY: &'static str = "SellerId";
}

impl OrderPayStatusChange {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `SellerId` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        post_req(client, url, &params).await
    }
}

/// Changes the shipping status of an order.
#[derive(Clone, Copy, Debug)]
pub struct OrderShipStatusChange;

impl StoreEndpoint for OrderShipStatusChange {
    const NAME: &'static str = "orderShipStatusChange";
    const ENDPOINT: Endpoint = circus_endpoint!("orderShipStatusChange");
    const SELLER_KEY: &'static str = "SellerId";
}

impl OrderShipStatusChange {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `SellerId` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        post_req(client, url, &params).await
    }

    /// Returns `Result/Warning` as a list.
    #[must_use]
    pub fn warnings(response: &Tree) -> Vec<Tree> {
        list_at(response, &["Result", "Warning"])
    }
}
