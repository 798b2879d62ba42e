mod compat_notice;
mod connect_button;
mod copy_address;
mod transfer_form;
mod wallet_card;
mod wallet_context;

pub use compat_notice::CompatNotice;
pub use connect_button::ConnectButton;
pub use copy_address::CopyAddress;
pub use transfer_form::TransferForm;
pub use wallet_card::WalletCard;
pub use wallet_context::WalletContextProvider;
