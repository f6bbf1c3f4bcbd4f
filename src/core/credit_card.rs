//! Credit card operations.
//!
//! Cards are lightweight display metadata. Deleting a card intentionally
//! leaves any expenses that reference it untouched; their `credit_card_id`
//! becomes a dangling reference and display falls back to an empty label.

use crate::{
    entities::{CardType, CreditCard, credit_card},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// Registers a credit card after validating the name and digits.
///
/// `last_four_digits` must be exactly four ASCII digits.
pub async fn create_credit_card(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    last_four_digits: &str,
    card_type: CardType,
) -> Result<credit_card::Model> {
    if name.trim().is_empty() {
        return Err(Error::MissingField { field: "name" });
    }
    if last_four_digits.len() != 4 || !last_four_digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidCardDigits {
            digits: last_four_digits.to_string(),
        });
    }

    let card = credit_card::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        name: Set(name.trim().to_string()),
        last_four_digits: Set(last_four_digits.to_string()),
        card_type: Set(card_type),
        created_at: Set(Utc::now()),
    };

    card.insert(db).await.map_err(Into::into)
}

/// Lists a user's credit cards in registration order.
pub async fn list_credit_cards(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<credit_card::Model>> {
    CreditCard::find()
        .filter(credit_card::Column::UserId.eq(user_id))
        .order_by_asc(credit_card::Column::CreatedAt)
        .order_by_asc(credit_card::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes one of the user's credit cards without cascading to expenses.
pub async fn delete_credit_card(
    db: &DatabaseConnection,
    user_id: &str,
    card_id: &str,
) -> Result<()> {
    let outcome = CreditCard::delete_many()
        .filter(credit_card::Column::Id.eq(card_id))
        .filter(credit_card::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if outcome.rows_affected == 0 {
        return Err(Error::CreditCardNotFound {
            id: card_id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::expense::list_expenses;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_create_card_validates_digits() -> Result<()> {
        let db = setup_test_db().await?;

        for bad in ["123", "12345", "12a4", "    "] {
            let result = create_credit_card(&db, "u1", "Everyday", bad, CardType::Visa).await;
            assert!(
                matches!(result, Err(Error::InvalidCardDigits { .. })),
                "expected rejection for {bad:?}"
            );
        }

        let card = create_credit_card(&db, "u1", "Everyday", "4242", CardType::Visa).await?;
        assert_eq!(card.last_four_digits, "4242");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_card_rejects_empty_name() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_credit_card(&db, "u1", "  ", "4242", CardType::Visa).await;
        assert!(matches!(result, Err(Error::MissingField { field: "name" })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_cards_is_user_scoped() -> Result<()> {
        let db = setup_test_db().await?;

        create_credit_card(&db, "u1", "Mine", "1111", CardType::Visa).await?;
        create_credit_card(&db, "u2", "Theirs", "2222", CardType::Mastercard).await?;

        let cards = list_credit_cards(&db, "u1").await?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Mine");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_card_preserves_expenses() -> Result<()> {
        let db = setup_test_db().await?;
        let card = create_test_card(&db, "u1").await?;

        let expense =
            create_test_card_expense(&db, "u1", "Shopping", dec!(50), date(2025, 1, 4), &card.id)
                .await?;

        delete_credit_card(&db, "u1", &card.id).await?;
        assert!(list_credit_cards(&db, "u1").await?.is_empty());

        // The expense survives with a dangling card reference
        let expenses = list_expenses(&db, "u1", None, None).await?;
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, expense.id);
        assert_eq!(expenses[0].credit_card_id.as_deref(), Some(card.id.as_str()));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_card_is_user_scoped() -> Result<()> {
        let db = setup_test_db().await?;
        let card = create_test_card(&db, "u1").await?;

        let result = delete_credit_card(&db, "u2", &card.id).await;
        assert!(matches!(result, Err(Error::CreditCardNotFound { .. })));
        assert_eq!(list_credit_cards(&db, "u1").await?.len(), 1);

        Ok(())
    }
}
